use trailmate_core::{Assessment, BadgeProgress, CategoryScore, LeaderboardEntry, RiskResult, Trail};

fn print_categories(scores: &[CategoryScore]) {
    for c in scores {
        println!("  {:<22} {:>3}/{:<3} {}", c.label, c.score, c.max, c.status);
        if let Some(s) = &c.suggestion {
            println!("      -> {}", s);
        }
    }
}

pub fn print_risk(result: &RiskResult) {
    println!("Readiness score: {}/100 ({})", result.overall_score, result.overall_status);
    println!("{}\n", result.overall_advice);
    print_categories(&result.category_scores);
    if !result.penalties.is_empty() {
        println!("\nDeductions:");
        for p in &result.penalties {
            println!("  - {}", p.describe());
        }
    }
}

pub fn print_assessment(a: &Assessment) {
    println!("Readiness score: {} ({})", a.overall_score, a.overall_status);
    println!("{}\n", a.overall_advice);
    print_categories(&a.category_scores);
}

pub fn print_trails(heading: &str, trails: &[&Trail]) {
    println!("{}", heading);
    if trails.is_empty() {
        println!("  (none)");
        return;
    }
    for t in trails {
        println!("  {:<32} [{}] {}", t.name, t.difficulty, t.description);
    }
}

pub fn print_badges(badges: &[BadgeProgress]) {
    for b in badges {
        let mark = if b.earned { "x" } else { " " };
        println!(
            "  [{}] {:<20} {:>5}/{:<5} {:>3.0}%  {}",
            mark,
            b.kind.title(),
            b.current,
            b.max,
            b.progress() * 100.0,
            b.kind.description()
        );
    }
}

pub fn print_leaderboard(board: &[LeaderboardEntry]) {
    for (i, e) in board.iter().enumerate() {
        println!("  {:>2}. {:<20} {} treks", i + 1, e.name, e.treks);
    }
}
