//! Command-line interface for svo
//! This binary parses Spanish sentences against the subject-verb-object grammar, runs the
//! fixture suites and compares the engine with the reference grammar.
//!
//! Usage:
//!   svo parse [SENTENCE...] [-f FILE]... [--trace] [--format NAME]  - Parse and print the tree
//!   svo check [--accept-dir DIR] [--reject-dir DIR]                  - Run the fixture suites
//!   svo compare [FILE...]                                            - Engine vs reference grammar
//!   svo view [SENTENCE...]                                           - Open the trace viewer
//!   svo lexicon [WORD]                                               - Inspect the lexicon
mod logger;
mod viewer;

use clap::{Arg, ArgAction, ArgMatches, Command};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use svo::svo::fixtures::{self, Expectation, FixtureError, SuiteReport};
use svo::svo::formats::{format_trace, format_tree, to_svg_str, FormatRegistry};
use svo::svo::lexicon::{Category, Lexicon};
use svo::svo::parsing::{compare, Comparison, Parser};
use svo::svo::tree::DerivationNode;

const DEFAULT_SENTENCES: [&str; 5] = [
    "La niña mira el perro.",
    "Juan ama Maria.",
    "Ana duerme.",
    "El perro corre.",
    "Corre la niña el perro.",
];

static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

fn main() {
    let registry = FormatRegistry::with_defaults();
    let formats = registry.list_formats().join(", ");
    let format_help: String = registry
        .descriptions()
        .iter()
        .map(|(name, description)| format!("\n  {:<10} {}", name, description))
        .collect();

    let matches = Command::new("svo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recognize Spanish subject-verb-object sentences")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lexicon")
                .long("lexicon")
                .global(true)
                .value_name("PATH")
                .help("YAML lexicon to use instead of the built-in one"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse sentences and print their derivation trees")
                .arg(
                    Arg::new("sentence")
                        .help("Sentences to parse (read from stdin when none are given)")
                        .num_args(0..)
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .action(ArgAction::Append)
                        .value_name("FILE")
                        .help("Read a sentence from a fixture file"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print the rule trace as a table"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help(format!("Tree output format ({})", formats))
                        .long_help(format!("Tree output format:{}", format_help))
                        .default_value("indented"),
                )
                .arg(
                    Arg::new("param")
                        .long("param")
                        .short('p')
                        .action(ArgAction::Append)
                        .value_name("KEY=VALUE")
                        .help("Format parameter (e.g., friendly-labels=false)"),
                )
                .arg(
                    Arg::new("svg-dir")
                        .long("svg-dir")
                        .value_name("DIR")
                        .help("Also write an SVG drawing of each accepted tree to DIR"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Run the accept/reject fixture suites")
                .arg(
                    Arg::new("accept-dir")
                        .long("accept-dir")
                        .default_value("tests/fixtures/accept"),
                )
                .arg(
                    Arg::new("reject-dir")
                        .long("reject-dir")
                        .default_value("tests/fixtures/reject"),
                )
                .arg(
                    Arg::new("show-tree")
                        .long("show-tree")
                        .action(ArgAction::SetTrue)
                        .help("Print the tree of every accepted fixture"),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare the engine with the reference grammar")
                .arg(
                    Arg::new("file")
                        .help("Fixture files (a built-in sample is used when none are given)")
                        .num_args(0..)
                        .index(1),
                )
                .arg(
                    Arg::new("show-tree")
                        .long("show-tree")
                        .action(ArgAction::SetTrue)
                        .help("Print the engine tree of every sentence"),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Open an interactive trace viewer")
                .arg(Arg::new("sentence").num_args(0..).index(1))
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .action(ArgAction::Append)
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            Command::new("lexicon")
                .about("Show the categories of a word, or the size of each category")
                .arg(Arg::new("word").index(1)),
        )
        .get_matches();

    logger::init(matches.get_count("verbose"));
    let parser = build_parser(matches.get_one::<String>("lexicon"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(&parser, &registry, parse_matches),
        Some(("check", check_matches)) => handle_check_command(&parser, check_matches),
        Some(("compare", compare_matches)) => handle_compare_command(&parser, compare_matches),
        Some(("view", view_matches)) => handle_view_command(&parser, view_matches),
        Some(("lexicon", lexicon_matches)) => {
            handle_lexicon_command(&parser, lexicon_matches.get_one::<String>("word"))
        }
        _ => unreachable!(),
    }
}

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn build_parser(lexicon_path: Option<&String>) -> Parser {
    match lexicon_path {
        Some(path) => {
            let lexicon = Lexicon::load(path).unwrap_or_else(|e| exit_with(e));
            Parser::new(Arc::new(lexicon))
        }
        None => Parser::default(),
    }
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Positional sentences followed by the sentences of `--file` fixtures
fn collect_sentences(matches: &ArgMatches) -> Vec<String> {
    let mut sentences = strings(matches, "sentence");
    for path in strings(matches, "file") {
        sentences.push(fixtures::load_sentence(&path).unwrap_or_else(|e| exit_with(e)));
    }
    sentences
}

/// `key=value` pairs into a parameter map
fn parse_params(raw: &[String]) -> Result<HashMap<String, String>, String> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(format!("Invalid parameter '{}', expected KEY=VALUE", pair)),
        })
        .collect()
}

/// File-name-safe version of a sentence
fn slugify(sentence: &str) -> String {
    let plain = svo::svo::lexing::strip_diacritics(&sentence.to_lowercase());
    let slug = SLUG_SEPARATORS.replace_all(&plain, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "sentence".to_string()
    } else {
        slug.to_string()
    }
}

/// Handle the parse command
fn handle_parse_command(parser: &Parser, registry: &FormatRegistry, matches: &ArgMatches) {
    let format = matches.get_one::<String>("format").unwrap();
    if !registry.has(format) {
        exit_with(format!(
            "Unknown format '{}' (available: {})",
            format,
            registry.list_formats().join(", ")
        ));
    }
    let params = parse_params(&strings(matches, "param")).unwrap_or_else(|e| exit_with(e));
    let show_trace = matches.get_flag("trace");
    let svg_dir = matches.get_one::<String>("svg-dir").map(PathBuf::from);

    let mut sentences = collect_sentences(matches);
    if sentences.is_empty() {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .unwrap_or_else(|e| exit_with(e));
        sentences.push(line.trim().to_string());
    }

    for (i, sentence) in sentences.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let traced = parser.parse_with_trace(sentence);
        let result = &traced.result;
        println!("Sentence: {}", sentence);
        println!(
            "{} ({}/{} tokens consumed)",
            if result.accepted { "ACCEPTED" } else { "REJECTED" },
            result.consumed,
            result.total()
        );

        if show_trace {
            println!();
            print!("{}", format_trace(&traced.trace, &result.tokens));
        }

        match &result.tree {
            Some(tree) => {
                println!();
                let output = registry
                    .serialize_with_params(tree, format, &params)
                    .unwrap_or_else(|e| exit_with(e));
                print!("{}", output);
                if !output.ends_with('\n') {
                    println!();
                }
                if let Some(dir) = &svg_dir {
                    let path = write_svg(dir, sentence, tree, &params);
                    println!("SVG written to {}", path.display());
                }
            }
            None => println!("No derivation tree. Run with --trace to see where parsing stopped."),
        }
    }
}

fn write_svg(
    dir: &Path,
    sentence: &str,
    tree: &DerivationNode,
    params: &HashMap<String, String>,
) -> PathBuf {
    let mut params = params.clone();
    params
        .entry("title".to_string())
        .or_insert_with(|| sentence.to_string());
    let svg = to_svg_str(tree, &params).unwrap_or_else(|e| exit_with(e));
    std::fs::create_dir_all(dir).unwrap_or_else(|e| exit_with(e));
    let path = dir.join(format!("{}.svg", slugify(sentence)));
    std::fs::write(&path, svg).unwrap_or_else(|e| exit_with(e));
    path
}

fn run_directory(
    parser: &Parser,
    dir: &str,
    expectation: Expectation,
) -> Result<SuiteReport, FixtureError> {
    let paths = fixtures::files_in(dir)?;
    if paths.is_empty() {
        log::warn!("no fixtures found in {}", dir);
    }
    fixtures::run_suite(parser, &paths, expectation)
}

/// Handle the check command
fn handle_check_command(parser: &Parser, matches: &ArgMatches) {
    let accept_dir = matches.get_one::<String>("accept-dir").unwrap();
    let reject_dir = matches.get_one::<String>("reject-dir").unwrap();
    let show_tree = matches.get_flag("show-tree");

    let mut report = run_directory(parser, accept_dir, Expectation::Accept)
        .unwrap_or_else(|e| exit_with(e));
    report.merge(
        run_directory(parser, reject_dir, Expectation::Reject).unwrap_or_else(|e| exit_with(e)),
    );

    for case in &report.cases {
        println!("{}", case);
        if show_tree {
            if let Some(tree) = &case.result.tree {
                print!("{}", tree_block(tree));
            }
        }
    }
    println!("{}", "-".repeat(60));
    println!("{}", report.summary());

    if !report.all_passed() {
        std::process::exit(1);
    }
}

/// Indented tree nested one level under a case line
fn tree_block(tree: &DerivationNode) -> String {
    indent(&format_tree(tree), "  ")
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines().map(|line| format!("{}{}\n", prefix, line)).collect()
}

fn print_comparison(comparison: &Comparison, show_tree: bool) {
    println!("{}", "-".repeat(60));
    println!("Sentence: {}", comparison.sentence);
    println!(
        "  Parser: {}",
        if comparison.engine_accepted() { "OK" } else { "FAIL" }
    );
    if show_tree {
        if let Some(tree) = &comparison.engine.tree {
            print!("{}", indent(&format_tree(tree), "    "));
        }
    }
    match comparison.reference_roles() {
        Some(roles) => println!(
            "  Reference: OK (subject: {}; verb: {}; object: {})",
            join_or_dash(&roles.subjects),
            join_or_dash(&roles.verbs),
            join_or_dash(&roles.objects)
        ),
        None => println!("  Reference: FAIL ({})", comparison.reference_errors.join("; ")),
    }
    let verdict = if comparison.agrees() {
        "agree"
    } else if comparison.acceptance_agrees() {
        "DISAGREE (tree)"
    } else {
        "DISAGREE (acceptance)"
    };
    println!("  Agreement: {}", verdict);
}

fn join_or_dash(words: &[String]) -> String {
    if words.is_empty() {
        "-".to_string()
    } else {
        words.join(", ")
    }
}

/// Handle the compare command
fn handle_compare_command(parser: &Parser, matches: &ArgMatches) {
    let files = strings(matches, "file");
    let sentences: Vec<String> = if files.is_empty() {
        DEFAULT_SENTENCES.iter().map(|s| s.to_string()).collect()
    } else {
        files
            .iter()
            .map(|path| fixtures::load_sentence(path).unwrap_or_else(|e| exit_with(e)))
            .collect()
    };
    let show_tree = matches.get_flag("show-tree");

    println!("Evaluating {} sentence(s)...", sentences.len());
    let mut agreed = 0;
    for sentence in &sentences {
        let comparison = compare(parser, sentence);
        if comparison.agrees() {
            agreed += 1;
        }
        print_comparison(&comparison, show_tree);
    }
    println!("{}", "-".repeat(60));
    println!("Agreement: {}/{} sentence(s).", agreed, sentences.len());
}

/// Handle the view command
fn handle_view_command(parser: &Parser, matches: &ArgMatches) {
    let mut sentences = collect_sentences(matches);
    if sentences.is_empty() {
        sentences = DEFAULT_SENTENCES.iter().map(|s| s.to_string()).collect();
    }
    if let Err(e) = viewer::viewer_main::run_viewer(parser, &sentences) {
        exit_with(e);
    }
}

/// Handle the lexicon command
fn handle_lexicon_command(parser: &Parser, word: Option<&String>) {
    let lexicon = parser.lexicon();
    match word {
        Some(word) => {
            let categories = lexicon.categories_of(word);
            if categories.is_empty() {
                println!("{}: not in the lexicon", word);
            } else {
                let names: Vec<String> = categories
                    .iter()
                    .map(|c| format!("{} ({})", c.tag(), c.display_name()))
                    .collect();
                println!("{}: {}", word, names.join(", "));
            }
        }
        None => {
            println!("Lexicon ({}):", lexicon.language().code());
            for category in Category::ALL {
                println!(
                    "  {:<5} {:<16} {:>3} forms",
                    category.tag(),
                    category.display_name(),
                    lexicon.size(category)
                );
            }
        }
    }
}
