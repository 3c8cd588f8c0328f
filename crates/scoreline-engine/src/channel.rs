//! Message channel seam and the serve loop

use crate::intent::IntentExtractor;
use crate::pipeline::{InboundMessage, MessagePipeline};
use scoreline_core::errors::{ExError, ExErrorKind};
use std::io::{BufRead, Write};

/// Source of inbound messages and sink for replies
pub trait MessageChannel {
    /// Next message, or `None` once the channel is closed
    fn recv(&mut self) -> Option<InboundMessage>;

    /// # Errors
    ///
    /// Delivery failures; `serve` logs them and keeps going.
    fn send(&mut self, to: &InboundMessage, reply: &str) -> Result<(), ExError>;
}

/// Drain `channel` through `pipeline`; returns how many messages were dispatched
pub fn serve<C, E>(channel: &mut C, pipeline: &MessagePipeline<E>) -> usize
where
    C: MessageChannel,
    E: IntentExtractor,
{
    let mut handled = 0;
    while let Some(message) = channel.recv() {
        let Some(outcome) = pipeline.handle_outcome(&message) else {
            continue;
        };
        handled += 1;
        if let Some(reply) = outcome.reply {
            if let Err(err) = channel.send(&message, &reply) {
                tracing::warn!(sender = %message.sender, err = %err, "reply not delivered");
            }
        }
    }
    tracing::debug!(handled, "channel closed");
    handled
}

/// Line-oriented channel: one message per non-blank input line, replies
/// written to the output followed by a newline
pub struct LineChannel<R, W> {
    input: R,
    output: W,
    sender: String,
}

impl<R: BufRead, W: Write> LineChannel<R, W> {
    pub fn new(input: R, output: W, sender: impl Into<String>) -> Self {
        Self {
            input,
            output,
            sender: sender.into(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> MessageChannel for LineChannel<R, W> {
    fn recv(&mut self) -> Option<InboundMessage> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) if line.trim().is_empty() => continue,
                Ok(_) => {
                    return Some(InboundMessage::from_user(
                        self.sender.as_str(),
                        line.trim_end_matches(&['\r', '\n'][..]),
                    ))
                }
                Err(err) => {
                    tracing::warn!(err = %err, "input read failed, closing channel");
                    return None;
                }
            }
        }
    }

    fn send(&mut self, _to: &InboundMessage, reply: &str) -> Result<(), ExError> {
        writeln!(self.output, "{}", reply)
            .and_then(|()| self.output.flush())
            .map_err(|e| {
                ExError::new(ExErrorKind::Io)
                    .with_op("send_reply")
                    .with_message(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_channel_skips_blank_lines() {
        let mut channel = LineChannel::new(Cursor::new("first\n\n  \nsecond\r\n"), Vec::new(), "op");

        let a = channel.recv().unwrap();
        let b = channel.recv().unwrap();

        assert_eq!(a.text.expose(), "first");
        assert_eq!(b.text.expose(), "second");
        assert_eq!(b.sender, "op");
        assert!(channel.recv().is_none());
    }

    #[test]
    fn test_line_channel_writes_replies() {
        let mut channel = LineChannel::new(Cursor::new(""), Vec::new(), "op");
        let to = InboundMessage::from_user("op", "x");

        channel.send(&to, "hello").unwrap();

        assert_eq!(channel.into_output(), b"hello\n");
    }
}
