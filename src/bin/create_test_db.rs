use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use trivia_api::{
    CategoryStore, NewAnswer, NewCategory, NewQuestion, QuestionStore, create_app_state,
};

/// A utility for creating a test database for the trivia REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Questions to seed, grouped by category title. The first answer is correct.
const SAMPLE_QUESTIONS: &[(&str, &[(&str, &[&str])])] = &[
    (
        "html",
        &[
            (
                "Which element is used for the largest heading?",
                &["h1", "h6", "head", "header"],
            ),
            (
                "Which attribute gives an image alternative text?",
                &["alt", "title", "src"],
            ),
        ],
    ),
    (
        "css",
        &[
            (
                "Which property changes the text colour?",
                &["color", "font-color", "text-color"],
            ),
            ("Which unit is relative to the root font size?", &["rem", "em", "px", "vh"]),
        ],
    ),
    (
        "javascript",
        &[(
            "Which keyword declares a block scoped constant?",
            &["const", "var", "let", "static"],
        )],
    ),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let state = create_app_state(Connection::open(output_path)?)?;

    for (title, questions) in SAMPLE_QUESTIONS {
        println!("Creating category {title:?}...");
        let category = state.category_store.create(NewCategory {
            title: title.to_string(),
        })?;

        for (text, answers) in questions.iter() {
            let answers = answers
                .iter()
                .enumerate()
                .map(|(index, answer)| NewAnswer {
                    text: answer.to_string(),
                    correct: index == 0,
                })
                .collect();

            state.question_store.create(NewQuestion {
                text: text.to_string(),
                cat_id: category.id,
                answers,
            })?;
        }

        println!("Created {} questions in {}", questions.len(), category.slug);
    }

    println!("Success!");

    Ok(())
}
