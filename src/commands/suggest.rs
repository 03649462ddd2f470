// src/commands/suggest.rs

//! Equivalent lookup command

use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct Suggestion<'a> {
    name: &'a str,
    candidates: Vec<String>,
}

/// Print Linux package candidates for each application name
pub fn cmd_suggest(names: &[String], json: bool) -> Result<()> {
    let suggestions: Vec<Suggestion> = names
        .iter()
        .map(|name| Suggestion {
            name,
            candidates: lunx::resolve(name),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    for suggestion in &suggestions {
        if suggestion.candidates.is_empty() {
            println!("{}: no known equivalent", suggestion.name);
        } else {
            println!("{}: {}", suggestion.name, suggestion.candidates.join(", "));
        }
    }
    Ok(())
}
