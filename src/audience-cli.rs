//! A small command-line audience member for a running PanelPulse server.
//! It drives the same optimistic engine as the audience view, so every action
//! prints the notice an audience member would see.

use clap::{Arg, ArgAction, ArgMatches, Command};

use panelpulse::engine::{AudienceEngine, EngineConfig, NoticeLevel};
use panelpulse::model::view::{Panel, QuestionId};
use panelpulse::store::http::HttpStore;

const PROGRAM_NAME: &str = "audience-cli";

const ABOUT_TEXT: &str = "Ask and vote on questions in a PanelPulse panel.

Engine settings are read from the `engine` table of Rocket.toml.

EXIT CODES:
     0: The action went through.
     1: The action was refused or failed.
     2: Configuration error.";

const SERVER: &str = "SERVER";
const PANEL_ID: &str = "PANEL_ID";
const TEXT: &str = "TEXT";
const AUTHOR: &str = "AUTHOR";
const QUESTION_ID: &str = "QUESTION_ID";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    let panel_id = Arg::new(PANEL_ID)
        .help("ID of the panel, as shown in its QR code link")
        .action(ArgAction::Set)
        .required(true);

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .arg(
            Arg::new(SERVER)
                .long("server")
                .help("Base URL of the audience API")
                .action(ArgAction::Set)
                .default_value("http://127.0.0.1:8000"),
        )
        .subcommand(
            Command::new("show")
                .about("List the panel's questions, newest first")
                .arg(panel_id.clone()),
        )
        .subcommand(
            Command::new("ask")
                .about("Submit a question")
                .arg(panel_id.clone())
                .arg(
                    Arg::new(TEXT)
                        .help("The question")
                        .action(ArgAction::Set)
                        .required(true),
                )
                .arg(
                    Arg::new(AUTHOR)
                        .long("author")
                        .help("Name to show; anonymous if omitted")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("vote")
                .about("Vote for a question")
                .arg(panel_id)
                .arg(
                    Arg::new(QUESTION_ID)
                        .help("ID of the question, as listed by `show`")
                        .action(ArgAction::Set)
                        .required(true),
                ),
        )
}

/// Print the panel the way the audience view lists it.
fn print_panel(panel: &Panel) {
    println!("{} (moderated by {})", panel.title, panel.moderator);
    if !panel.panelists.is_empty() {
        println!("Panelists: {}", panel.panelists.join(", "));
    }
    for question in &panel.questions {
        let marker = if question.voted { "*" } else { " " };
        println!(
            "{marker}{:>4}  {}  [{}] {} ({:?})",
            question.score, question.id, question.author, question.text, question.status
        );
    }
}

/// Run the chosen subcommand, returning the process exit code.
async fn run(args: &ArgMatches) -> u8 {
    let config = match EngineConfig::from_figment(&rocket::Config::figment()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid engine configuration: {e}");
            return 2;
        }
    };
    let server = args
        .get_one::<String>(SERVER)
        .map(String::as_str)
        .unwrap_or_default();
    let engine = AudienceEngine::new(HttpStore::new(server), config);

    let Some((command, sub_args)) = args.subcommand() else {
        return 2;
    };
    let panel_id = sub_args
        .get_one::<String>(PANEL_ID)
        .map(String::as_str)
        .unwrap_or_default();

    let mut succeeded = engine.reload(panel_id).await.is_ok();
    if succeeded {
        succeeded = match command {
            "ask" => {
                let text = sub_args
                    .get_one::<String>(TEXT)
                    .map(String::as_str)
                    .unwrap_or_default();
                let author = sub_args.get_one::<String>(AUTHOR).map(String::as_str);
                engine.submit(panel_id, text, author).await.is_ok()
            }
            "vote" => {
                let question_id: QuestionId = sub_args
                    .get_one::<String>(QUESTION_ID)
                    .map(String::as_str)
                    .unwrap_or_default()
                    .into();
                match engine.toggle_vote(&question_id).await {
                    Ok(Some(_)) => true,
                    Ok(None) => {
                        eprintln!("No question {question_id} in this panel");
                        false
                    }
                    Err(_) => false,
                }
            }
            _ => true,
        };
    }

    for notice in engine.take_notices() {
        match notice.level {
            NoticeLevel::Error => eprintln!("{notice}"),
            NoticeLevel::Success | NoticeLevel::Info => println!("{notice}"),
        }
    }
    if let Some(panel) = engine.snapshot().panel() {
        print_panel(panel);
    }

    if succeeded {
        0
    } else {
        1
    }
}

#[rocket::main]
async fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args).await;
    std::process::exit(exit_code.into())
}
