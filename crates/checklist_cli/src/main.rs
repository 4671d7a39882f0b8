use checklist_cli::cli::{Cli, Command, ConfigOverrideTarget, parse_config_override};
use checklist_core::config::{self, Config, ConfigOverrides, Palette};
use checklist_core::error::AppError;
use checklist_core::model::{Progress, Task};
use checklist_core::store::TaskStore;
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};

// Display constants only; the store itself is unbounded.
const MAX_TASKS_DISPLAY: usize = 10;
const PROGRESS_BAR_CELLS: usize = 10;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "task")]
    label: String,
}

fn print_tasks_plain(tasks: &[Task], palette: &Palette) {
    if tasks.is_empty() {
        println!("{}", palette.mutedize("No tasks yet."));
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .enumerate()
        .map(|(position, task)| TaskRow {
            position,
            label: task.label.clone(),
        })
        .collect();

    println!("{}", palette.accentize("Today's Tasks"));
    println!("{}", Table::new(rows).with(Style::sharp()));
}

fn print_tasks_json(tasks: &[Task]) {
    let payload: Vec<serde_json::Value> = tasks
        .iter()
        .enumerate()
        .map(|(position, task)| {
            serde_json::json!({
                "position": position,
                "label": task.label,
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn print_progress_plain(report: Progress, palette: &Palette) {
    let percent = (report.fraction * 100.0).round() as u32;
    let filled = ((report.fraction * PROGRESS_BAR_CELLS as f64).round() as usize)
        .min(PROGRESS_BAR_CELLS);
    let bar = format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_CELLS - filled)
    );

    println!(
        "{}",
        palette.mutedize(&format!("Tasks: {} / {}", report.added, MAX_TASKS_DISPLAY))
    );
    println!("{}", palette.mutedize(&format!("Progress: {percent}%")));
    println!("{}", palette.accentize(&bar));
}

fn print_progress_json(report: Progress) {
    let json = serde_json::json!({
        "added": report.added,
        "completed": report.completed,
        "progress": report.fraction,
    });
    println!("{}", json);
}

fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }
    Ok(overrides)
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn expand_alias(args: Vec<String>, config: &Config) -> Result<Vec<String>, AppError> {
    let Some(first) = args.first() else {
        return Ok(args);
    };
    let Some(expansion) = config.aliases.get(first) else {
        return Ok(args);
    };

    let mut expanded = split_command_line(expansion)?;
    expanded.extend(args.into_iter().skip(1));
    Ok(expanded)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(cli: Cli, store: &mut TaskStore, config: &mut Config) -> Result<(), AppError> {
    let overrides = collect_overrides(&cli.config_override)?;
    *config = config::merge_overrides(config, &overrides);
    let palette = config::palette_for_theme(config.theme.as_deref());

    match cli.command {
        Command::Add { label } => {
            let label = match label.as_deref().map(str::trim) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => return Err(AppError::invalid_input("label is required")),
            };

            let position = store.add_task(&label)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "position": position, "label": label })
                );
            } else {
                println!("Added task: {label} (#{position})");
            }
        }
        Command::Done { position } => {
            let task = store.complete_task(position)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "position": position, "label": task.label })
                );
            } else {
                println!("Completed task: {} (#{position})", task.label);
            }
        }
        Command::List => {
            if cli.json {
                print_tasks_json(store.tasks());
            } else {
                print_tasks_plain(store.tasks(), &palette);
            }
        }
        Command::Progress => {
            if cli.json {
                print_progress_json(store.progress_report());
            } else {
                print_progress_plain(store.progress_report(), &palette);
            }
        }
    }

    Ok(())
}

fn run_interactive(mut config: Config) -> Result<(), AppError> {
    // One store per shell session; it dies with the process.
    let mut store = TaskStore::new();
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        let args = match expand_alias(args, &config) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("checklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, &mut store, &mut config) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    let load = config::load_config_with_fallback();
    if let Some(err) = load.error.as_ref() {
        eprintln!("WARNING: {}", err);
    }
    let mut config = load.config;

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive(config) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    // A one-shot invocation is a one-command session against a fresh store.
    let mut store = TaskStore::new();
    if let Err(err) = run_command(cli, &mut store, &mut config) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
