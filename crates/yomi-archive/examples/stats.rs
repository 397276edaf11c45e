use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use yomi_archive::{Dictionary, DictionaryReader, Metadata};
use yomi_types::{Definition, Rank};

const USAGE: &str = "usage: cargo run -p yomi-archive --example stats -- <archive.zip> [--rank]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let path = args.next().map(PathBuf::from).context(USAGE)?;
    let rank = matches!(args.next().as_deref(), Some("--rank"));

    println!("Archive: {}", path.display());
    if rank {
        let dict: Dictionary<Rank> = DictionaryReader::new()
            .with_path(&path)
            .read()
            .with_context(|| format!("reading rank archive {}", path.display()))?;
        print_metadata(&dict.metadata);
        println!("Entries      : {}", dict.len());
        println!(
            "Max rank     : {}",
            dict.iter().map(|r| r.rank).max().unwrap_or(0)
        );
        for r in dict.iter().take(10) {
            println!("  {r}");
        }
    } else {
        let dict: Dictionary<Definition> = DictionaryReader::new()
            .with_path(&path)
            .read()
            .with_context(|| format!("reading definition archive {}", path.display()))?;
        print_metadata(&dict.metadata);
        let terms: HashSet<_> = dict.iter().map(|d| &d.term).collect();
        let glosses: usize = dict.iter().map(|d| d.definitions.len()).sum();
        let abnormal = dict.iter().filter(|d| !d.is_normal()).count();
        let popular = dict.iter().filter(|d| d.popularity > 0).count();
        println!("Entries      : {}", dict.len());
        println!("Unique terms : {}", terms.len());
        println!("Glosses      : {}", glosses);
        println!("Abnormal     : {}", abnormal);
        println!("With popularity: {}", popular);
    }

    Ok(())
}

fn print_metadata(metadata: &Metadata) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("Title        : {}", field(&metadata.title));
    println!("Revision     : {}", field(&metadata.revision));
    println!("Author       : {}", field(&metadata.author));
    println!("Attribution  : {}", field(&metadata.attribution));
}
