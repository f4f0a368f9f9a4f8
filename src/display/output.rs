use crate::catalog::ChampionRecord;
use crate::game::session::SessionResults;
use colored::*;
use std::rc::Rc;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct CategoryRow {
    category: String,
    champions: String,
}

#[derive(Tabled)]
struct TagRow {
    rank: String,
    tag: String,
    votes: String,
}

pub fn display_categories(tag_counts: &[(String, usize)], total: usize) {
    println!("\n{}", "🎯 Categories".bold().cyan());
    println!("{}\n", "=".repeat(40).cyan());

    let mut rows = vec![CategoryRow {
        category: "all".to_string(),
        champions: total.to_string(),
    }];
    for (tag, count) in tag_counts {
        rows.push(CategoryRow {
            category: tag.clone(),
            champions: count.to_string(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_card(record: &ChampionRecord, image_url: &str, position: usize, total: usize, smashed: usize) {
    println!(
        "\n{} {}",
        format!("[{}/{}]", position, total).dimmed(),
        format!("🔥 Smash: {}", smashed).magenta()
    );
    println!("{}", record.name.bold().yellow());
    println!("{}", record.title.italic());
    println!("{} {}", "🖼️".cyan(), image_url.underline());
}

pub fn display_results(results: &SessionResults, smashed: &[Rc<ChampionRecord>]) {
    println!("\n{}", "🏁 RESULTS".bold().cyan());
    println!("{}\n", "=".repeat(40).cyan());

    println!(
        "{} {} / {}",
        "Smashed:".bold(),
        results.accepted.to_string().green(),
        results.total
    );
    if results.skipped > 0 {
        println!(
            "{} {} (image unavailable)",
            "Skipped:".bold(),
            results.skipped.to_string().yellow()
        );
    }
    if let Some(duration) = results.duration {
        println!(
            "{} {}m {}s",
            "Time:".bold(),
            duration.num_minutes(),
            duration.num_seconds() % 60
        );
    }

    if !smashed.is_empty() {
        let names: Vec<&str> = smashed.iter().map(|r| r.name.as_str()).collect();
        println!("{} {}", "Smash list:".bold(), names.join(", "));
    }

    match &results.preference.dominant_tag {
        Some(tag) => println!(
            "\n{} {} (with {} votes)",
            "Your favourite type:".bold(),
            format!("{}s", tag).bold().magenta(),
            results.preference.count
        ),
        None => {
            println!("\n{}", "You didn't smash anyone! 😢".yellow());
            return;
        }
    }

    if results.preference.tally.is_empty() {
        return;
    }

    let rows: Vec<TagRow> = results
        .preference
        .tally
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| TagRow {
            rank: format!("#{}", idx + 1),
            tag: entry.tag,
            votes: entry.count.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
