use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use quiz_services::{QuizConfig, Services};
use quiz_utils::verify::{count_correct, split_answers};
use quiz_utils::{QuizError, SelectedTerm, Verdict};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Build a fill-in-the-blank vocabulary quiz from a passage and take it in
/// the terminal.
#[derive(Parser, Debug)]
#[command(name = "quiz", version, about)]
struct Args {
    /// Term dictionary, one term per line
    #[arg(long, env = "TERM_DICTIONARY_PATH")]
    dictionary: Option<PathBuf>,

    /// Compiled ko-dic dictionary for the tokenizer
    #[arg(long, env = "KO_DIC_PATH")]
    ko_dic: Option<String>,

    /// Topic of the passage (prompted for when omitted)
    #[arg(short, long)]
    topic: Option<String>,

    /// Passage text (prompted for when omitted)
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the passage from a file
    #[arg(long)]
    text_file: Option<PathBuf>,

    #[arg(long, env = "MIN_BLANKS")]
    min_blanks: Option<usize>,

    #[arg(long, env = "MAX_BLANKS")]
    max_blanks: Option<usize>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut QuizConfig) {
        if let Some(path) = &self.dictionary {
            config.dictionary_path = path.clone();
        }
        if let Some(ko_dic) = &self.ko_dic {
            config.ko_dic_path = Some(ko_dic.clone());
        }
        if let Some(min) = self.min_blanks {
            config.min_blanks = min;
        }
        if let Some(max) = self.max_blanks {
            config.max_blanks = max;
        }
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn render_terms(terms: &[SelectedTerm]) -> String {
    terms
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let note = if term.found { "" } else { " (not found in passage)" };
            format!("{}. {} ({:.3}){note}\n", i + 1, term.term, term.score)
        })
        .collect()
}

fn render_verdicts(verdicts: &[Verdict]) -> String {
    let mut out = String::new();
    for verdict in verdicts {
        if verdict.correct {
            out.push_str(&format!("{}. {} ✓\n", verdict.position, verdict.given));
        } else {
            out.push_str(&format!(
                "{}. {} ✗ (answer: {})\n",
                verdict.position, verdict.given, verdict.expected
            ));
        }
    }
    out
}

fn score_line(verdicts: &[Verdict], blanks: usize) -> String {
    format!("Score: {}/{blanks}", count_correct(verdicts))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = QuizConfig::from_env()?;
    args.apply(&mut config);
    let services = Services::from_config(&config)?;

    let topic = match &args.topic {
        Some(topic) => topic.clone(),
        None => prompt("Topic: ")?,
    };
    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => prompt("Passage: ")?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Ranking terms...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = services.pipeline().build(&topic, &text).await;
    spinner.finish_and_clear();

    let quiz = match result {
        Ok(quiz) => quiz,
        Err(QuizError::NoCandidates | QuizError::NoRankedTerms) => {
            println!("No terms related to the topic were found in the passage.");
            return Ok(());
        }
        Err(QuizError::NoSpansFound) => {
            println!("None of the selected terms could be located in the passage.");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to build the quiz"),
    };

    println!("\nSelected terms:");
    print!("{}", render_terms(&quiz.terms));
    println!("\nQuiz:\n{}\n", quiz.quiz_text);

    let line = prompt(&format!(
        "Enter {} answers separated by spaces: ",
        quiz.blank_count()
    ))?;
    let verdicts = quiz.check(&split_answers(&line));

    println!();
    print!("{}", render_verdicts(&verdicts));
    println!("{}", score_line(&verdicts, quiz.blank_count()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_utils::verify::verify_answers;

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "quiz",
            "--topic",
            "극한",
            "--text",
            "함수의 극한",
            "--max-blanks",
            "4",
        ])
        .unwrap();
        assert_eq!(args.topic.as_deref(), Some("극한"));

        let mut config = QuizConfig::default();
        args.apply(&mut config);
        assert_eq!(config.max_blanks, 4);
        assert_eq!(config.min_blanks, 3);

        assert!(Args::try_parse_from(["quiz", "--text", "a", "--text-file", "b.txt"]).is_err());
    }

    #[test]
    fn test_render_terms() {
        let terms = vec![
            SelectedTerm {
                term: "삼각형".to_string(),
                score: 0.91234,
                found: true,
            },
            SelectedTerm {
                term: "빗변".to_string(),
                score: 0.5,
                found: false,
            },
        ];
        assert_eq!(
            render_terms(&terms),
            "1. 삼각형 (0.912)\n2. 빗변 (0.500) (not found in passage)\n"
        );
    }

    #[test]
    fn test_verdicts_and_score() {
        let verdicts = verify_answers(&["함수", "극한"], &split_answers("함수 극한값"));
        assert_eq!(
            render_verdicts(&verdicts),
            "1. 함수 ✓\n2. 극한값 ✗ (answer: 극한)\n"
        );
        assert_eq!(score_line(&verdicts, 2), "Score: 1/2");
    }
}
