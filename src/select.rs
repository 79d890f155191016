//! Interactive candidate review.

use std::io::{self, BufRead, Write};

use crate::search::ImageResult;

/// Capability seam for the blocking yes/no prompt, so the selection logic
/// can be driven by a scripted double in tests.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Production prompt: reads stdin, reprompts until the answer is one of
/// y/yes/n/no (case-insensitive). EOF counts as "no".
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("{}", prompt);
            let _ = io::stdout().flush();
            let answer = match lines.next() {
                Some(Ok(line)) => line,
                _ => return false,
            };
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Please answer 'y' or 'n'."),
            }
        }
    }
}

/// Walk the candidates in order and return the first accepted image URL.
///
/// Candidates without an image URL are skipped without prompting (they still
/// count toward the displayed total). Returns `None` when the operator
/// rejects everything: an empty outcome, not an error.
pub fn choose<'a>(results: &'a [ImageResult], confirm: &mut dyn Confirm) -> Option<&'a str> {
    let total = results.len();
    for (index, result) in results.iter().enumerate() {
        let url = match result.image_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => continue,
        };
        println!("[{}/{}] {}", index + 1, total, url);
        if let Some(source) = result.source() {
            println!("    Source: {}", source);
        }
        if confirm.confirm("Download this image? (y/n): ") {
            return Some(url);
        }
    }
    None
}
