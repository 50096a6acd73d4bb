use std::io::BufRead;
use tokio::sync::mpsc;

/// Reads stdin lines on a plain thread and forwards them; the channel
/// closes on EOF or when the receiver is gone.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    line_rx
}
