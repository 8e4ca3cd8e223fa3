use menu::{render, Collection, Item, Menu, MenuBuild};
use pretty_assertions::assert_eq;
use serde_json::json;

fn site() -> (Collection, MenuBuild) {
    let collection: Collection = [
        ("intro.txt", "1", "Intro"),
        ("setup.txt", "1.1", "Setup"),
        ("usage.txt", "1.2", "Usage"),
        ("deep.txt", "2.1.1", "Deep"),
        ("faq.txt", "10", "FAQ"),
    ]
    .into_iter()
    .map(|(path, key, contents)| {
        (
            path.to_string(),
            Item::new(contents).with_field("menu", json!(key)),
        )
    })
    .collect();

    let build = Menu::default().build(&collection).unwrap();
    (collection, build)
}

#[test]
fn test_sitemap_flat() {
    let (_, build) = site();
    insta::assert_snapshot!(render::sitemap_flat(&build.tree), @r###"
    1 -> intro.txt
    1.1 -> setup.txt
    1.2 -> usage.txt
    2 -> dummy node
    2.1 -> dummy node
    2.1.1 -> deep.txt
    10 -> faq.txt
    "###);
}

#[test]
fn test_sitemap_indented() {
    let (_, build) = site();
    let expected = [
        "1 -> intro.txt",
        "  1 -> setup.txt",
        "  2 -> usage.txt",
        "2 -> dummy node",
        "  1 -> dummy node",
        "    1 -> deep.txt",
        "10 -> faq.txt",
    ]
    .join("\n");
    assert_eq!(render::sitemap_indented(&build.tree), expected);
}

#[test]
fn test_global_menu() {
    let (_, build) = site();
    insta::assert_snapshot!(render::global_menu(&build.tree), @r###"
    # global menu
    1 - intro.txt { 1.1 - setup.txt, 1.2 - usage.txt }
    2 - dummy { 2.1 - dummy }
    10 - faq.txt {  }
    "###);
}

#[test]
fn test_breadcrumbs() {
    let (_, build) = site();
    assert_eq!(
        render::breadcrumbs(&build.tree, build.nodes["deep.txt"]),
        ">> 2 - dummy >> 2.1 - dummy >> 2.1.1 - deep.txt"
    );
    assert_eq!(
        render::breadcrumbs(&build.tree, build.nodes["intro.txt"]),
        ">> 1 - intro.txt"
    );
}

#[test]
fn test_local_menu() {
    let (_, build) = site();
    assert_eq!(
        render::local_menu(&build.tree, build.nodes["usage.txt"]),
        "# local menu\n1 - intro.txt\n1.2 - usage.txt (current)"
    );
    assert_eq!(
        render::local_menu(&build.tree, build.nodes["intro.txt"]),
        "# local menu\n1 - intro.txt (current)\n1.1 - setup.txt\n1.2 - usage.txt"
    );
}

#[test]
fn test_merged() {
    let (collection, build) = site();
    let merged = render::merged(&build.tree, &collection);
    let lines: Vec<&str> = merged.lines().collect();

    assert_eq!(&lines[..4], &["# 1 - intro.txt", "Intro", "# 1.1 - setup.txt", "Setup"]);
    assert_eq!(&lines[6..9], &["# 2 - dummy", "", "# 2.1 - dummy"]);
    assert_eq!(lines.last(), Some(&"FAQ"));
}
