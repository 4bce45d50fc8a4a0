use std::{
    io::{self, Write},
    path::Path,
};

use clap::Parser;

use repl::{
    config::Cli,
    logging,
    session::SubmitOutcome,
    upload::{self, UploadError},
    ChatSession, HttpChatBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::configure_logging();
    let cli = Cli::parse();

    let backend =
        HttpChatBackend::new(&cli.endpoint, cli.timeout())?.with_assistant_id(cli.assistant_id.clone());
    let mut session = ChatSession::default();

    println!("Connected to {}", backend.endpoint());
    println!("   - Commands available: [ '.upload <path>' | '.history' | '.quit' ]");
    println!();
    print_history(&session);

    let stdin = io::stdin();
    loop {
        println!();
        print!("Ask about the CVs: ");
        io::stdout().flush()?;

        let input_txt = match read_line(&stdin)? {
            Some(line) => line,
            None => return Ok(()),
        };

        match process_repl_commands(&input_txt) {
            CliReplActions::ProcessInput => {}
            CliReplActions::Upload(path) => {
                report_upload(Path::new(&path));
                continue;
            }
            CliReplActions::History => {
                print_history(&session);
                continue;
            }
            CliReplActions::Quit => return Ok(()),
            CliReplActions::Reprompt => continue,
        }

        println!("...");
        match session.submit(&input_txt, &backend).await {
            SubmitOutcome::Ignored => continue,
            SubmitOutcome::Replied => {}
            SubmitOutcome::Failed { notice } => eprintln!("Error: {notice}"),
        }

        if let Some(message) = session.last_message() {
            println!("{message}");
        }
    }
}

/// `None` once stdin is closed.
fn read_line(stdin: &io::Stdin) -> io::Result<Option<String>> {
    let mut input_txt = String::new();
    if stdin.read_line(&mut input_txt)? == 0 {
        return Ok(None);
    }
    Ok(Some(input_txt.trim().to_string()))
}

fn print_history(session: &ChatSession) {
    for message in session.transcript().messages() {
        println!("{message}");
    }
}

fn report_upload(path: &Path) {
    match upload::request_upload(path) {
        UploadError::NotPdf => eprintln!("Invalid file type: {}", UploadError::NotPdf),
        e => eprintln!("Upload failed: {e}"),
    }
}

enum CliReplActions {
    ProcessInput,
    Upload(String),
    History,
    Quit,
    Reprompt,
}

fn process_repl_commands(input_txt: &str) -> CliReplActions {
    if input_txt == ".quit" {
        return CliReplActions::Quit;
    }

    if input_txt == ".history" {
        return CliReplActions::History;
    }

    if input_txt.starts_with(".upload") {
        let input_tokens = input_txt.split_ascii_whitespace().collect::<Vec<_>>();
        if let [".upload", input_path] = input_tokens[..] {
            return CliReplActions::Upload(input_path.to_string());
        } else {
            println!("Command usage: .upload <PDF_FILE_PATH>");
            return CliReplActions::Reprompt;
        }
    }

    CliReplActions::ProcessInput
}
