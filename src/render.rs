//! Plain-text board rendering.
//!
//! Each cell is printed with a marker: `=` exact, `~` present, `.` absent.
//! Digits that have never been guessed are printed bare in the tracker line.

use matrixle_core::{CELL_COUNT, Digit, DigitTracker, Feedback, Guess, MAX_ATTEMPTS, Session, SessionStatus};
use tracing::instrument;

/// Marker character for a feedback label.
pub fn feedback_symbol(feedback: Feedback) -> char {
    match feedback {
        Feedback::Exact => '=',
        Feedback::Present => '~',
        Feedback::Absent => '.',
    }
}

/// Renders one guess as `[a b; c d] x [e; f] = [g; h]` with a marker after
/// every digit.
pub fn render_guess(guess: &Guess) -> String {
    let cells = guess.equation().cells();
    let marked: Vec<String> = (0..CELL_COUNT)
        .map(|i| format!("{}{}", cells[i], feedback_symbol(guess.feedback()[i])))
        .collect();
    format!(
        "[{} {}; {} {}] x [{}; {}] = [{}; {}]",
        marked[0], marked[1], marked[2], marked[3], marked[4], marked[5], marked[6], marked[7]
    )
}

/// Renders the digit tracker as one line, digits 1 to 9.
pub fn render_tracker(tracker: &DigitTracker, history: &[Guess]) -> String {
    let seen = |digit: Digit| {
        history
            .iter()
            .any(|guess| guess.equation().cells().contains(&digit))
    };
    tracker
        .iter()
        .map(|(digit, status)| {
            if seen(digit) {
                format!("{}{}", digit, feedback_symbol(status))
            } else {
                format!("{} ", digit)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the whole board: header, numbered guesses, tracker and status.
#[instrument(skip(session), fields(puzzle_id = session.puzzle().id()))]
pub fn render_session(session: &Session) -> String {
    let puzzle = session.puzzle();
    let mut lines = vec![format!("Matrixle #{} ({})", puzzle.id(), puzzle.date())];

    for (n, guess) in session.history().iter().enumerate() {
        lines.push(format!("{}. {}", n + 1, render_guess(guess)));
    }

    lines.push(format!(
        "Digits: {}",
        render_tracker(session.digits(), session.history())
    ));

    lines.push(match session.status() {
        SessionStatus::Playing => format!(
            "Attempts left: {}/{}",
            session.attempts_remaining(),
            MAX_ATTEMPTS
        ),
        SessionStatus::Won => format!("Solved in {}/{}", session.history().len(), MAX_ATTEMPTS),
        SessionStatus::Lost => format!("Out of attempts. The answer was {}", puzzle.equation()),
    });

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use matrixle_core::{CandidateGuess, Puzzle, reset_session, submit_guess, validate_guess};

    fn session_after(guesses: &[[i64; CELL_COUNT]]) -> Session {
        let secret = validate_guess(&CandidateGuess::from_values([2, 1, 1, 3, 3, 2, 8, 9]))
            .expect("consistent secret");
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        guesses.iter().fold(reset_session(Puzzle::new(73, date, secret)), |session, values| {
            submit_guess(&session, &CandidateGuess::from_values(*values), at).expect("accepted")
        })
    }

    #[test]
    fn test_symbols() {
        assert_eq!(feedback_symbol(Feedback::Exact), '=');
        assert_eq!(feedback_symbol(Feedback::Present), '~');
        assert_eq!(feedback_symbol(Feedback::Absent), '.');
    }

    #[test]
    fn test_render_guess_markers() {
        let session = session_after(&[[1, 1, 1, 2, 3, 2, 5, 7]]);
        let line = render_guess(&session.history()[0]);
        assert_eq!(line, "[1. 1=; 1= 2~] x [3=; 2=] = [5.; 7.]");
    }

    #[test]
    fn test_tracker_marks_unseen_digits_bare() {
        let session = session_after(&[[1, 1, 1, 2, 3, 2, 5, 7]]);
        let line = render_tracker(session.digits(), session.history());
        assert_eq!(line, "1= 2= 3= 4  5. 6  7. 8  9 ");
    }

    #[test]
    fn test_render_session_status_lines() {
        let playing = render_session(&session_after(&[[1, 1, 1, 1, 4, 5, 9, 9]]));
        assert!(playing.starts_with("Matrixle #73 (2026-03-14)"));
        assert!(playing.ends_with("Attempts left: 5/6"));

        let won = render_session(&session_after(&[[2, 1, 1, 3, 3, 2, 8, 9]]));
        assert!(won.ends_with("Solved in 1/6"));

        let lost = render_session(&session_after(&[[1, 1, 1, 1, 4, 5, 9, 9]; 6]));
        assert!(lost.ends_with("Out of attempts. The answer was [2 1; 1 3] x [3; 2] = [8; 9]"));
    }
}
