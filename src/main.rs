// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::io::{self, Read};

use anyhow::Context;
use clap::{arg, command, value_parser, ArgMatches, Command};
use jsre::{Captures, MatchResult, Regex};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = command!()
        .arg_required_else_help(true)
        .subcommands(vec![
            regex_command("exec").about("Print the capture groups of the first match"),
            regex_command("test").about("Print whether the text matches, exit with 1 if not"),
            regex_command("match").about("Print the result of String.prototype.match"),
            regex_command("match-all").about("Print the capture groups of all matches"),
            regex_command("search").about("Print the position of the first match, or -1"),
            Command::new("replace")
                .about("Replace the first match, or all matches with the `g` flag")
                .arg(arg!(<REGEX> "A regex literal such as /a+/g, or a pattern with --flags"))
                .arg(arg!(<REPLACEMENT> "The replacement, supports $&, $1, $<name> etc."))
                .arg(arg!([TEXT] "The input text, read from stdin when absent"))
                .arg(arg!(--flags <FLAGS> "Flags of a plain pattern"))
                .arg(arg!(--all "Use String.prototype.replaceAll, requires the `g` flag")),
            regex_command("split")
                .about("Split the text by the regex")
                .arg(
                    arg!(--limit <N> "The maximum number of pieces")
                        .value_parser(value_parser!(usize)),
                ),
            Command::new("explain")
                .about("Print the normalized pattern and the compiled routes")
                .arg(arg!(<PATTERN> "The pattern, without the slashes and flags")),
        ])
        .get_matches();

    match args.subcommand() {
        Some(("exec", args)) => exec_exec(args),
        Some(("test", args)) => exec_test(args),
        Some(("match", args)) => exec_match(args),
        Some(("match-all", args)) => exec_match_all(args),
        Some(("search", args)) => exec_search(args),
        Some(("replace", args)) => exec_replace(args),
        Some(("split", args)) => exec_split(args),
        Some(("explain", args)) => exec_explain(args),
        _ => unreachable!(),
    }
}

fn regex_command(name: &'static str) -> Command {
    Command::new(name)
        .arg(arg!(<REGEX> "A regex literal such as /a+/g, or a pattern with --flags"))
        .arg(arg!([TEXT] "The input text, read from stdin when absent"))
        .arg(arg!(--flags <FLAGS> "Flags of a plain pattern"))
}

fn get_str<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{}>", name))
}

// `/.../flags` is a literal, anything else is a plain pattern.
fn build_regex(args: &ArgMatches) -> anyhow::Result<Regex> {
    let regex = get_str(args, "REGEX")?;
    let flags = args.get_one::<String>("flags");

    let re = match flags {
        Some(flags) => Regex::with_flags(regex, flags),
        None if regex.starts_with('/') && regex.len() > 1 => Regex::from_literal(regex),
        None => Regex::new(regex),
    }
    .with_context(|| format!("invalid regex `{}`", regex))?;

    log::debug!("regex: {}", re);
    Ok(re)
}

fn read_text(args: &ArgMatches) -> anyhow::Result<String> {
    if let Some(text) = args.get_one::<String>("TEXT") {
        return Ok(text.to_owned());
    }

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("can not read the text from stdin")?;

    // drop the line break appended by `echo`
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }

    Ok(text)
}

fn print_captures(captures: &Captures) {
    println!("index: {}", captures.index());
    for (idx, group) in captures.iter().enumerate() {
        match group {
            Some(m) => {
                let name = m.name.map(|name| format!(" <{}>", name)).unwrap_or_default();
                println!("{}{}: {:?} ({}..{})", idx, name, m.as_str(), m.start(), m.end());
            }
            None => println!("{}: undefined", idx),
        }
    }
}

fn exec_exec(args: &ArgMatches) -> anyhow::Result<()> {
    let re = build_regex(args)?;
    let text = read_text(args)?;

    match re.exec(&text) {
        Some(captures) => print_captures(&captures),
        None => println!("null"),
    }
    Ok(())
}

fn exec_test(args: &ArgMatches) -> anyhow::Result<()> {
    let re = build_regex(args)?;
    let text = read_text(args)?;

    let result = re.test(&text);
    println!("{}", result);

    if !result {
        std::process::exit(1);
    }
    Ok(())
}

fn exec_match(args: &ArgMatches) -> anyhow::Result<()> {
    let re = build_regex(args)?;
    let text = read_text(args)?;

    match re.match_str(&text) {
        Some(MatchResult::Captures(captures)) => print_captures(&captures),
        Some(MatchResult::All(values)) => println!("{:?}", values),
        None => println!("null"),
    }
    Ok(())
}

fn exec_match_all(args: &ArgMatches) -> anyhow::Result<()> {
    let re = build_regex(args)?;
    let text = read_text(args)?;

    for captures in re.match_all(&text)? {
        print_captures(&captures);
    }
    Ok(())
}

fn exec_search(args: &ArgMatches) -> anyhow::Result<()> {
    let re = build_regex(args)?;
    let text = read_text(args)?;

    match re.search(&text) {
        Some(position) => println!("{}", position),
        None => println!("-1"),
    }
    Ok(())
}

fn exec_replace(args: &ArgMatches) -> anyhow::Result<()> {
    let re = build_regex(args)?;
    let replacement = get_str(args, "REPLACEMENT")?;
    let text = read_text(args)?;

    let result = if args.get_flag("all") {
        re.replace_all(&text, replacement)?
    } else {
        re.replace(&text, replacement)
    };

    println!("{}", result);
    Ok(())
}

fn exec_split(args: &ArgMatches) -> anyhow::Result<()> {
    let re = build_regex(args)?;
    let text = read_text(args)?;
    let limit = args.get_one::<usize>("limit").copied();

    println!("{:?}", re.split(&text, limit));
    Ok(())
}

fn exec_explain(args: &ArgMatches) -> anyhow::Result<()> {
    let pattern = get_str(args, "PATTERN")?;
    let text = jsre::explain(pattern).with_context(|| format!("invalid pattern `{}`", pattern))?;

    println!("{}", text);
    Ok(())
}
