use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::debug;
use thiserror::Error;

use rcv_ballot::client::search::filter_candidates;
use rcv_ballot::client::session::SessionError;
use rcv_ballot::client::{
    AdminSession, ApiClient, BallotDraft, ClientError, DraftError, FlashBoard, FlashKind,
    SessionStore,
};
use rcv_ballot::models::dto::DEFAULT_TOKEN_COUNT;

#[derive(Parser)]
#[command(name = "rcv-console", version, about = "Ranked-choice ballot console (voters and admins)")]
struct Cli {
    /// Adresse du serveur
    #[arg(long, env = "RCV_API_URL", default_value = "http://127.0.0.1:4000")]
    api_url: String,

    /// Fichier où la session admin est conservée entre deux commandes
    #[arg(long, env = "RCV_SESSION_FILE", default_value = ".rcv_session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List candidates, optionally filtered by name, party or tagline
    Candidates {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Check whether a voting token can still be used
    Check { token: String },
    /// Rank candidates (strongest preference first) and submit the ballot
    Vote {
        #[arg(long)]
        token: String,
        /// Candidate ids in rank order
        picks: Vec<String>,
        /// Move the pick at rank FROM to rank TO before submitting
        #[arg(long = "move", value_name = "FROM:TO", value_parser = parse_move)]
        moves: Vec<(usize, usize)>,
    },
    /// Log in as administrator and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RCV_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored admin session
    Logout,
    /// List every submitted ballot (admin)
    Votes,
    /// Mint one-time voting tokens (admin)
    Tokens {
        #[arg(short, long)]
        count: Option<u32>,
    },
}

#[derive(Debug, Error)]
enum ConsoleError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Not logged in, run `rcv-console login` first")]
    NotLoggedIn,
    #[error("Invalid or used token.")]
    InvalidToken,
    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),
}

/// "3:1" => rang 3 déplacé au rang 1
fn parse_move(raw: &str) -> Result<(usize, usize), String> {
    let (from, to) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got {:?}", raw))?;
    let rank = |value: &str| match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("invalid rank {:?}", value)),
    };
    Ok((rank(from)?, rank(to)?))
}

/// Réponse vide => valeur par défaut, sinon un entier positif ou nul
fn parse_count_answer(answer: &str) -> Option<u32> {
    if answer.is_empty() {
        return Some(DEFAULT_TOKEN_COUNT);
    }
    answer.parse().ok()
}

fn print_flash(board: &mut FlashBoard) {
    if let Some(flash) = board.current(Instant::now()) {
        match flash.kind {
            FlashKind::Ok => println!("✅ {}", flash.text),
            FlashKind::Warn => println!("⚠️  {}", flash.text),
        }
    }
}

fn prompt(question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn require_session(store: &SessionStore) -> Result<AdminSession, ConsoleError> {
    store.load()?.ok_or(ConsoleError::NotLoggedIn)
}

async fn vote(
    api: &ApiClient,
    token: &str,
    picks: &[String],
    moves: &[(usize, usize)],
) -> Result<bool, ConsoleError> {
    if !api.check_token(token).await? {
        return Err(ConsoleError::InvalidToken);
    }

    let reference = api.candidates().await?;
    let mut draft = BallotDraft::new(reference.ballot_size);
    let mut board = FlashBoard::default();

    for id in picks {
        if !reference.candidates.iter().any(|c| &c.id == id) {
            return Err(ConsoleError::UnknownCandidate(id.clone()));
        }
        if let Err(e) = draft.add(id) {
            board.show(e.to_string(), FlashKind::Warn, Instant::now());
            print_flash(&mut board);
            break;
        }
    }

    for &(from, to) in moves {
        draft.move_pick(from - 1, to - 1)?;
    }

    println!("Your ranked list ({}/{}):", draft.len(), draft.capacity());
    for (index, id) in draft.picks().iter().enumerate() {
        let name = reference
            .candidates
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(id.as_str());
        println!("  {:>2}. {}", index + 1, name);
    }

    let ballot = match draft.submission() {
        Ok(ballot) => ballot,
        Err(e) => {
            board.show(e.to_string(), FlashKind::Warn, Instant::now());
            print_flash(&mut board);
            return Ok(false);
        }
    };

    let submitted = match api.submit_ballot(token, &ballot).await {
        Ok(()) => {
            board.show("Vote submitted successfully", FlashKind::Ok, Instant::now());
            true
        }
        Err(e) => {
            debug!("Ballot submission failed: {}", e);
            board.show("Submission failed", FlashKind::Warn, Instant::now());
            false
        }
    };
    print_flash(&mut board);

    Ok(submitted)
}

async fn run(cli: Cli) -> Result<bool, ConsoleError> {
    let api = ApiClient::new(cli.api_url);
    let store = SessionStore::new(cli.session_file);

    match cli.command {
        Command::Candidates { query } => {
            let reference = api.candidates().await?;
            for c in filter_candidates(&reference.candidates, &query) {
                println!("{:<5} {:<14} {:<12} {}", c.id, c.name, c.party, c.tagline);
            }
        }
        Command::Check { token } => {
            let valid = api.check_token(&token).await?;
            println!("{}", if valid { "valid" } else { "invalid or used" });
            return Ok(valid);
        }
        Command::Vote { token, picks, moves } => {
            return vote(&api, &token, &picks, &moves).await;
        }
        Command::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };
            let session = api.login(&email, &password).await?;
            store.save(&session)?;
            println!("Logged in as {}", session.email);
        }
        Command::Logout => {
            store.clear()?;
            println!("Logged out");
        }
        Command::Votes => {
            let session = require_session(&store)?;
            let ballots = api.list_votes(&session).await?;
            println!("{} ballot(s)", ballots.len());
            for record in ballots {
                println!("#{} {} {}", record.id, record.created_at.format("%Y-%m-%d %H:%M:%S"), record.token);
                println!("    {}", record.ballot.join(" > "));
            }
        }
        Command::Tokens { count } => {
            let session = require_session(&store)?;
            let count = match count {
                Some(count) => count,
                None => {
                    let answer = prompt(&format!(
                        "How many tokens to generate? [{}] ",
                        DEFAULT_TOKEN_COUNT
                    ))?;
                    match parse_count_answer(&answer) {
                        Some(count) => count,
                        None => {
                            println!("Invalid count");
                            return Ok(false);
                        }
                    }
                }
            };
            if count == 0 {
                println!("Aborted");
                return Ok(false);
            }

            let codes = api.generate_tokens(&session, count).await?;
            println!("Generated tokens:");
            for code in codes {
                println!("  {}", code);
            }
        }
    }

    Ok(true)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(ConsoleError::Client(e)) if e.status() == Some(401) => {
            eprintln!("❌ {} (session expired? run `rcv-console login`)", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("3:1"), Ok((3, 1)));
        assert!(parse_move("3").is_err());
        assert!(parse_move("0:2").is_err());
        assert!(parse_move("a:b").is_err());
    }

    #[test]
    fn test_parse_count_answer() {
        assert_eq!(parse_count_answer(""), Some(DEFAULT_TOKEN_COUNT));
        assert_eq!(parse_count_answer("25"), Some(25));
        assert_eq!(parse_count_answer("0"), Some(0));
        assert_eq!(parse_count_answer("abc"), None);
        assert_eq!(parse_count_answer("-3"), None);
    }

    #[test]
    fn test_cli_parses_vote() {
        let cli = Cli::try_parse_from([
            "rcv-console", "vote", "--token", "abc", "c1", "c2", "--move", "2:1",
        ])
        .unwrap();

        match cli.command {
            Command::Vote { token, picks, moves } => {
                assert_eq!(token, "abc");
                assert_eq!(picks, vec!["c1", "c2"]);
                assert_eq!(moves, vec![(2, 1)]);
            }
            _ => panic!("expected vote command"),
        }
    }
}
