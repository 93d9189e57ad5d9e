use anyhow::Result;
use std::io::{self, Write};
use trailmate_core::questionnaire::{Question, QuestionKind};
use trailmate_core::{AnswerValue, QuestionnaireForm, TrekMode};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn prompt_checklist(label: &str, options: &[&str]) -> Result<Vec<String>> {
    println!("{} (numbers separated by spaces; blank to skip)", label);
    for (i, o) in options.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, o);
    }
    let raw = prompt(">")?;
    Ok(raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|t| t.parse::<usize>().ok())
        .filter_map(|n| options.get(n.wrapping_sub(1)))
        .map(|o| o.to_string())
        .collect())
}

fn ask(form: &mut QuestionnaireForm, question: &Question) -> Result<()> {
    let marker = if question.required { "*" } else { "" };
    let label = format!("{}{} [{}]", question.label, marker, question.hint);

    match question.kind {
        QuestionKind::MultiSelect(options) => {
            let picked = prompt_checklist(&label, options)?;
            form.answer(question.key, AnswerValue::many(picked));
        }
        _ => {
            let raw = prompt(&label)?;
            if !raw.is_empty() {
                form.answer(question.key, raw);
            }
        }
    }
    Ok(())
}

/// Walk every topic page once and return the filled form.
pub fn run_interview(mode: TrekMode) -> Result<QuestionnaireForm> {
    let mut form = QuestionnaireForm::new(mode);
    println!("TrailMate questionnaire ({:?} trek)\n", mode);
    println!("Fields marked * are required.\n");

    loop {
        let topic = form.current_topic();
        println!("## {}", topic.title);
        for q in topic.questions {
            ask(&mut form, q)?;
        }
        println!();

        if form.is_last_topic() {
            break;
        }
        form.advance();
    }

    Ok(form)
}
