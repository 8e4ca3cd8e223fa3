use anyhow::{bail, Context, Result};
use key_tree::{Atom, Tree};
use log::info;
use menu::{render, Collection, Menu, MenuBuild, Options};
use serde::Serialize;
use serde_json::Value;

const USAGE: &str =
    "usage: menu <items.json> [tree|sitemap|global|breadcrumbs|local|merged|keys] [options.json]";

/// One entry of the `keys` view
#[derive(Serialize)]
struct KeyEntry<'a> {
    key: &'a [Atom],
    item: Option<&'a str>,
}

fn load_options(path: Option<String>) -> Result<Options> {
    let Some(path) = path else {
        return Ok(Options::default());
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read options from {}", path))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path))?;
    Ok(Options::from_value(&value)?)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().context(USAGE)?;
    let view = args.next().unwrap_or_else(|| "tree".to_string());
    let options = load_options(args.next())?;

    let collection = Collection::load(&input)?;
    info!("loaded {} items from {}", collection.len(), input);

    let menu = Menu::new(options);
    let MenuBuild { tree, nodes } = menu
        .build(&collection)
        .with_context(|| format!("Failed to build the menu for {}", input))?;

    match view.as_str() {
        "tree" => println!("{}", render::sitemap_indented(&tree)),
        "sitemap" => println!("{}", render::sitemap_flat(&tree)),
        "global" => println!("{}", render::global_menu(&tree)),
        "merged" => println!("{}", render::merged(&tree, &collection)),
        "breadcrumbs" => {
            for (path, &id) in &nodes {
                println!("{}: {}", path, render::breadcrumbs(&tree, id));
            }
        }
        "local" => {
            for (path, &id) in &nodes {
                println!("{}\n{}\n", path, render::local_menu(&tree, id));
            }
        }
        "keys" => {
            let entries: Vec<KeyEntry> = tree
                .children_all()
                .iter()
                .map(|&id| KeyEntry {
                    key: tree.key_segment(id),
                    item: tree.payload(id).map(String::as_str),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        other => bail!("unknown view {:?}\n{}", other, USAGE),
    }

    Ok(())
}
