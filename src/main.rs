use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use folio::{
    listing,
    pipeline::{self, tag_index, SortOrder},
    render::{self, Format},
    slug::{deslugify, og_title, slugify},
    toc::table_of_contents,
    ContentKind,
};
use log::debug;
use state::State;

mod state;

fn kind_arg() -> Arg {
    Arg::new("kind")
        .help("Content collection")
        .value_parser(["posts", "works", "blog"])
}

fn cli() -> Command {
    command!()
        .subcommand_required(true)
        .args(&[
            Arg::new("content_dir")
                .long("content-dir")
                .help("Directory holding the posts/, works/ and blog/ collections")
                .env("FOLIO_CONTENT_DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value("src/content")
                .global(true),
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["text", "json", "html"])
                .default_value("text")
                .global(true),
        ])
        .subcommand(
            Command::new("list")
                .about("List entries of a collection, newest first by default")
                .arg(kind_arg().required(true))
                .arg(
                    Arg::new("order")
                        .long("order")
                        .help("ascending or descending. Anything else leaves the listing unsorted")
                        .default_value("descending"),
                )
                .arg(
                    Arg::new("drafts")
                        .long("drafts")
                        .help("Include unpublished entries")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("series")
                .about("List the posts of a series in reading order")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("similar")
                        .long("similar")
                        .help("Include unpublished posts of the series")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tag")
                .about("List posts carrying a tag")
                .arg(Arg::new("slug").required(true).help("Tag slug, e.g. machine-learning")),
        )
        .subcommand(
            Command::new("tags")
                .about("List the tags of a collection with their entry counts")
                .arg(kind_arg().default_value("posts")),
        )
        .subcommand(
            Command::new("toc")
                .about("Print the table of contents of an entry")
                .arg(kind_arg().required(true))
                .arg(Arg::new("slug").required(true)),
        )
        .subcommand(
            Command::new("slugify")
                .about("Turn text into a slug")
                .arg(Arg::new("text").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("deslugify")
                .about("Turn a slug into a title")
                .arg(Arg::new("slug").required(true)),
        )
        .subcommand(
            Command::new("og-title")
                .about("Title printed on the Open Graph card of a page")
                .arg(Arg::new("slug")),
        )
}

fn kind_of(matches: &ArgMatches) -> anyhow::Result<ContentKind> {
    let kind: &String = matches.get_one("kind").context("missing collection")?;
    kind.parse()
}

fn emit(out: String) {
    if out.is_empty() || out.ends_with('\n') {
        print!("{out}");
    } else {
        println!("{out}");
    }
}

fn run(command: &str, matches: &ArgMatches) -> anyhow::Result<()> {
    let s = State::instance();

    let out = match command {
        "slugify" => {
            let words: Vec<&String> = matches.get_many::<String>("text").into_iter().flatten().collect();
            let text = words.iter().map(|w| w.as_str()).collect::<Vec<_>>().join(" ");
            slugify(&text)
        }
        "deslugify" => {
            let slug: &String = matches.get_one("slug").context("missing slug")?;
            deslugify(slug)
        }
        "og-title" => og_title(matches.get_one::<String>("slug").map(String::as_str)),
        _ => {
            if !s.content_dir.is_dir() {
                bail!("content_dir({:?}) must be a directory.", s.content_dir);
            }
            let source = s.source();

            match command {
                "list" => {
                    let kind = kind_of(matches)?;
                    let order: &String = matches.get_one("order").context("missing order")?;
                    let order = SortOrder::from(order.as_str());
                    let entries = if matches.get_flag("drafts") {
                        pipeline::sort_by_date(source.load_all(kind)?, order)
                    } else {
                        listing::sorted_published(&source, kind, order)?
                    };
                    render::render_list(s.format, &s.site_name, kind.dir_name(), &entries)?
                }
                "series" => {
                    let name: &String = matches.get_one("name").context("missing series")?;
                    let entries = if matches.get_flag("similar") {
                        listing::similar_posts(&source, name)?
                    } else {
                        listing::series_posts(&source, name)?
                    };
                    render::render_list(s.format, &s.site_name, &format!("Series: {name}"), &entries)?
                }
                "tag" => {
                    let slug: &String = matches.get_one("slug").context("missing tag")?;
                    let entries = listing::posts_by_tag(&source, slug)?;
                    let title = format!("Tag: {}", deslugify(slug));
                    render::render_list(s.format, &s.site_name, &title, &entries)?
                }
                "tags" => {
                    let kind = kind_of(matches)?;
                    let entries = pipeline::filter_published(source.load_all(kind)?);
                    render::render_tags(s.format, &tag_index(&entries))?
                }
                "toc" => {
                    let kind = kind_of(matches)?;
                    let slug: &String = matches.get_one("slug").context("missing slug")?;
                    let Some(entry) = source.find(kind, slug)? else {
                        bail!("No {kind} entry with slug {slug:?} in {:?}", source.root());
                    };
                    let headings = table_of_contents(&entry.body);
                    render::render_toc(s.format, &format!("/{kind}/{slug}"), &headings)?
                }
                _ => bail!("Unknown command: {command}"),
            }
        }
    };

    emit(out);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let content_dir: &PathBuf = matches
        .get_one("content_dir")
        .context("content_dir has a default")?;
    let format: &String = matches.get_one("format").context("format has a default")?;
    let format: Format = format.parse()?;
    let site_name = std::env::var("SITE_NAME").unwrap_or_default();

    if !State::init(content_dir.to_owned(), format, site_name) {
        bail!("state initialized twice");
    }
    debug!("{:?}", State::instance());

    let Some((command, sub_matches)) = matches.subcommand() else {
        bail!("no command given");
    };
    run(command, sub_matches)
}
