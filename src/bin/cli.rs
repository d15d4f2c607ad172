use std::io::{self, Write};

use clap::{Parser, Subcommand};
use dotenv::dotenv;

use lectio::books;
use lectio::cache::{reference_key, FileStore, VerseCache};
use lectio::client::{compare_translations, ContentClient, VerseSource};
use lectio::random::random_verse;
use lectio::reference::Reference;
use lectio::LectioError;

#[derive(Parser)]
#[command(name = "lectio", version, about = "CLI for looking up Bible verses")]
struct Cli {
    /// Translation code (e.g. NIV, KJV)
    #[arg(short, long)]
    translation: Option<String>,

    /// Directory holding the persisted verse cache
    #[arg(long, default_value = ".lectio")]
    cache_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a reference like "John 3:16" or "Genesis 1:1-3"
    Lookup { reference: String },
    /// Search verse text
    Search {
        query: String,
        #[arg(long, default_value_t = 100)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
    /// Print a random verse, optionally from one book
    Random { book: Option<String> },
    /// List cross references for a single verse
    Xref { reference: String },
    /// Compare a single verse across translations
    Compare {
        reference: String,
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let client = ContentClient::from_env();

    match run(&cli, &client).await {
        Ok(lines) => {
            let mut stdout = io::stdout();
            for line in lines {
                stdout.write_fmt(format_args!("{}\n", line))?;
            }
            Ok(())
        }
        Err(e) => io::stderr().write_fmt(format_args!("{}\n", e)),
    }
}

async fn run(cli: &Cli, client: &ContentClient) -> Result<Vec<String>, LectioError> {
    let translation = cli.translation.as_deref();

    match &cli.command {
        Command::Lookup { reference } => {
            let parsed: Reference = reference.parse()?;
            match &parsed.verses {
                // Single verses go through the persisted cache
                Some(range) if range.start() == range.end() => {
                    let cache = VerseCache::load(FileStore::new(&cli.cache_dir));
                    let verse = cache
                        .lookup(
                            client,
                            &parsed.book,
                            parsed.chapter,
                            *range.start(),
                            translation,
                        )
                        .await?;
                    Ok(vec![
                        Reference::single_verse(&verse.book.name, verse.chapter_id, verse.verse_id)
                            .to_string(),
                        format!("{} {}", verse.verse_id, verse.text),
                    ])
                }
                _ => {
                    let verses = client.by_reference(reference, translation).await?;
                    let header = Reference {
                        book: books::normalize_book_name(&parsed.book),
                        chapter: parsed.chapter,
                        verses: parsed.verses.clone(),
                    };
                    let mut lines = vec![header.to_string()];
                    lines.extend(verses.iter().map(|v| format!("{} {}", v.verse_id, v.text)));
                    Ok(lines)
                }
            }
        }
        Command::Search {
            query,
            limit,
            offset,
        } => {
            let verses = client.search(query, translation, *limit, *offset).await?;
            Ok(verses
                .iter()
                .map(|v| format!("{} {}:{} {}", v.book.name, v.chapter_id, v.verse_id, v.text))
                .collect())
        }
        Command::Random { book } => {
            let verse = random_verse(client, book.as_deref(), translation).await?;
            let cache = VerseCache::load(FileStore::new(&cli.cache_dir));
            cache.put(
                &reference_key(&verse.book.name, verse.chapter_id, verse.verse_id),
                &verse,
            )?;
            Ok(vec![format!(
                "{} {}:{} {}",
                verse.book.name, verse.chapter_id, verse.verse_id, verse.text
            )])
        }
        Command::Xref { reference } => {
            let (parsed, verse) = single_verse_reference(reference)?;
            let related = client
                .cross_references(&parsed.book, parsed.chapter, verse, translation)
                .await?;
            Ok(related
                .iter()
                .map(|r| format!("{} {}:{} {}", r.book.name, r.chapter_id, r.verse_id, r.text))
                .collect())
        }
        Command::Compare { reference, codes } => {
            let (parsed, verse) = single_verse_reference(reference)?;
            let codes: Vec<&str> = codes.iter().map(String::as_str).collect();
            let comparison =
                compare_translations(client, &parsed.book, parsed.chapter, verse, &codes).await?;
            Ok(comparison
                .iter()
                .map(|c| match &c.verse {
                    Some(v) => format!("{} {}", c.translation, v.text),
                    None => format!("{} (unavailable)", c.translation),
                })
                .collect())
        }
    }
}

/// Parses a reference that must address exactly one verse.
fn single_verse_reference(reference: &str) -> Result<(Reference, i32), LectioError> {
    let parsed: Reference = reference.parse()?;
    match &parsed.verses {
        Some(range) if range.start() == range.end() => {
            let verse = *range.start();
            Ok((parsed, verse))
        }
        _ => Err(LectioError::InvalidReference {
            reference: reference.to_string(),
        }),
    }
}
