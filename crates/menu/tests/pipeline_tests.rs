use key_tree::{Atom, KeyError, Tree, TreeTraversal};
use menu::{Collection, Item, Menu, MenuError, Metadata, Options};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn collection(entries: &[(&str, Value)]) -> Collection {
    entries
        .iter()
        .map(|(path, key)| {
            let item = Item::new(format!("contents of {}", path)).with_field("menu", key.clone());
            (path.to_string(), item)
        })
        .collect()
}

#[test]
fn test_run_publishes_tree_and_nodes() {
    let mut items = collection(&[("a.txt", json!("1.1")), ("b.txt", json!("1.2")), ("c.txt", json!("2"))]);
    items.insert("plain.txt", Item::new("no key"));
    let mut metadata = Metadata::new();

    Menu::default().run(&mut items, &mut metadata).unwrap();

    let tree = metadata.menu("menu").unwrap();
    let a = items.get("a.txt").unwrap().node("menu").unwrap();
    let c = items.get("c.txt").unwrap().node("menu").unwrap();
    assert_eq!(tree.payload(a).map(String::as_str), Some("a.txt"));
    assert_eq!(tree.key_segment(c), &[Atom::Int(2)]);
    assert_eq!(items.get("plain.txt").unwrap().node("menu"), None);

    let one = tree.parent(a).unwrap();
    assert!(tree.is_dummy(one));
    assert_eq!(tree.children(tree.root()), &[one, c]);
    assert_eq!(tree.children_all().len(), 4);
}

#[test]
fn test_filter_selects_items() {
    let mut items = collection(&[
        ("docs/a.txt", json!("1")),
        ("docs/b.md", json!("2")),
        ("other/c.txt", json!("3")),
    ]);
    let mut metadata = Metadata::new();

    let menu = Menu::from_value(&json!({ "filter": ["docs/**", "!**/*.md"] })).unwrap();
    menu.run(&mut items, &mut metadata).unwrap();

    let tree = metadata.menu("menu").unwrap();
    assert_eq!(tree.items().len(), 1);
    assert!(items.get("docs/a.txt").unwrap().node("menu").is_some());
    assert!(items.get("docs/b.md").unwrap().node("menu").is_none());
    assert!(items.get("other/c.txt").unwrap().node("menu").is_none());
}

#[test]
fn test_custom_fields_and_disabled_outputs() {
    let mut items: Collection = [
        ("x", Item::default().with_field("order", json!([2, "b"]))),
        ("y", Item::default().with_field("order", json!([2, "a"]))),
    ]
    .into_iter()
    .map(|(path, item)| (path.to_string(), item))
    .collect();
    let mut metadata = Metadata::new();

    let options = Options::builder()
        .key_field("order")
        .tree_output_field(Some("nav"))
        .node_output_field(None::<String>)
        .build()
        .unwrap();
    let menu = Menu::new(options);
    menu.run(&mut items, &mut metadata).unwrap();

    assert!(metadata.menu("menu").is_none());
    let tree = metadata.menu("nav").unwrap();
    assert_eq!(items.get("x").unwrap().node("nav"), None);

    let paths: Vec<_> = tree
        .items()
        .into_iter()
        .filter_map(|id| tree.payload(id).cloned())
        .collect();
    assert_eq!(paths, vec!["y", "x"]);
}

#[test]
fn test_build_without_publishing() {
    let items = collection(&[("a", json!("3")), ("b", json!("1"))]);
    let menu = Menu::from_value(&json!({ "treeOutputField": null })).unwrap();
    let build = menu.build(&items).unwrap();

    assert_eq!(build.nodes.len(), 2);
    assert_eq!(build.tree.children(build.tree.root()), &[build.nodes["b"], build.nodes["a"]]);
}

#[test]
fn test_invalid_key_aborts_build() {
    let mut items = collection(&[("good", json!("1")), ("bad", json!([1, null]))]);
    let mut metadata = Metadata::new();

    let err = Menu::default().run(&mut items, &mut metadata).unwrap_err();
    assert_eq!(
        err,
        MenuError::Key {
            path: "bad".to_string(),
            error: KeyError::InvalidKeyComponent {
                index: 1,
                reason: "null values are not allowed".to_string(),
            },
        }
    );
    assert!(metadata.menu("menu").is_none());
    assert_eq!(items.get("good").unwrap().node("menu"), None);
}

#[test]
fn test_null_key_is_skipped() {
    let items = collection(&[("a", json!("1")), ("b", Value::Null)]);
    let build = Menu::default().build(&items).unwrap();
    assert_eq!(build.nodes.keys().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_custom_reader_skip_and_violation() {
    let reader = |raw: &Value, _: &Item, _: &Options| -> Result<Option<Vec<Atom>>, KeyError> {
        match raw.as_str() {
            Some("skip") => Ok(None),
            Some("empty") => Ok(Some(Vec::new())),
            Some(other) => Ok(Some(vec![Atom::from(other)])),
            None => Ok(None),
        }
    };
    let options = Options::builder().key_reader(reader).build().unwrap();
    let menu = Menu::new(options);

    let build = menu
        .build(&collection(&[("a", json!("skip")), ("b", json!("kept"))]))
        .unwrap();
    assert_eq!(build.nodes.len(), 1);
    assert_eq!(build.tree.key_segment(build.nodes["b"]), &[Atom::from("kept")]);

    let err = menu
        .build(&collection(&[("a", json!("empty"))]))
        .unwrap_err();
    assert!(matches!(
        err,
        MenuError::CustomReaderContractViolation { ref path, .. } if path == "a"
    ));
}

#[test]
fn test_string_shorthand_options() {
    let items: Collection = [(
        "page".to_string(),
        Item::default().with_field("nav", json!("1.2")),
    )]
    .into_iter()
    .collect();

    let build = Menu::from_value(&json!("nav")).unwrap().build(&items).unwrap();
    assert_eq!(
        build.tree.key_segment(build.nodes["page"]),
        &[Atom::Int(1), Atom::Int(2)]
    );
}

#[test]
fn test_default_options_agree_on_hidden_paths() {
    let items = collection(&[(".hidden/a.txt", json!("1")), ("visible.txt", json!("2"))]);

    let constructions = [
        ("default", Options::default()),
        ("null", Options::from_value(&Value::Null).unwrap()),
        ("builder", Options::builder().build().unwrap()),
        ("empty object", Options::from_value(&json!({})).unwrap()),
    ];
    for (name, options) in constructions {
        let build = Menu::new(options).build(&items).unwrap();
        assert_eq!(
            build.nodes.keys().collect::<Vec<_>>(),
            vec!["visible.txt"],
            "{}",
            name
        );
    }
}
