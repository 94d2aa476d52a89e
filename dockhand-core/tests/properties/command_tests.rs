//! Property tests for Docker command construction and shell quoting

use proptest::prelude::*;

use dockhand_core::docker::{build_exec_command, build_follow_command, build_tail_command, shell_quote};

/// Reads one shell word the way a POSIX shell would, honoring single
/// quotes and backslash escapes outside them. Returns the word and how
/// much input it consumed.
fn read_shell_word(input: &str) -> Option<(String, usize)> {
    let mut word = String::new();
    let mut chars = input.char_indices();
    let mut consumed = 0;
    let mut saw_anything = false;

    while let Some((idx, ch)) = chars.next() {
        consumed = idx + ch.len_utf8();
        match ch {
            '\'' => {
                saw_anything = true;
                // Literal until the closing quote.
                let mut closed = false;
                for (j, inner) in chars.by_ref() {
                    consumed = j + inner.len_utf8();
                    if inner == '\'' {
                        closed = true;
                        break;
                    }
                    word.push(inner);
                }
                if !closed {
                    return None;
                }
            }
            '\\' => {
                saw_anything = true;
                let (j, escaped) = chars.next()?;
                consumed = j + escaped.len_utf8();
                word.push(escaped);
            }
            ' ' | '\t' => {
                consumed = idx;
                break;
            }
            other => {
                saw_anything = true;
                word.push(other);
            }
        }
    }

    saw_anything.then_some((word, consumed))
}

proptest! {
    /// Property: quoting then shell-reading yields the original string,
    /// as a single word, with nothing left over.
    #[test]
    fn shell_quote_round_trips_through_a_shell_reader(snippet in ".*") {
        let quoted = shell_quote(&snippet);
        let (word, consumed) = read_shell_word(&quoted)
            .expect("quoted string must read as a complete word");
        prop_assert_eq!(word, snippet);
        prop_assert_eq!(consumed, quoted.len());
    }

    /// Property: the quoted form never contains an unescaped quote that
    /// would let the payload terminate the `sh -lc` argument early.
    #[test]
    fn exec_snippet_stays_one_token(snippet in "[^\\s].*") {
        let command = build_exec_command("web", &snippet).unwrap();
        let prefix = "docker exec web sh -lc ";
        prop_assert!(command.starts_with(prefix));

        let token = &command[prefix.len()..];
        let (word, consumed) = read_shell_word(token)
            .expect("exec argument must read as a complete word");
        prop_assert_eq!(word, snippet.trim().to_string());
        prop_assert_eq!(consumed, token.len());
    }

    /// Property: whitespace-only snippets are always rejected.
    #[test]
    fn blank_snippets_are_rejected(snippet in "[ \\t]*") {
        prop_assert!(build_exec_command("web", &snippet).is_err());
    }

    /// Property: tail and follow commands embed the requested line count
    /// and differ only by the follow flag.
    #[test]
    fn tail_and_follow_commands_embed_the_count(
        name in "[a-zA-Z0-9][a-zA-Z0-9_.-]{0,30}",
        tail in 0u32..100_000,
    ) {
        let tail_cmd = build_tail_command(&name, tail);
        let follow_cmd = build_follow_command(&name, tail);

        prop_assert_eq!(&tail_cmd, &format!("docker logs --tail {tail} {name}"));
        prop_assert_eq!(&follow_cmd, &format!("docker logs --tail {tail} -f {name}"));
    }
}

#[test]
fn obrien_snippet_cannot_break_out_of_the_quotes() {
    let command = build_exec_command("web", "O'Brien; rm -rf /").unwrap();
    let token = &command["docker exec web sh -lc ".len()..];
    let (word, consumed) = read_shell_word(token).unwrap();
    assert_eq!(word, "O'Brien; rm -rf /");
    assert_eq!(consumed, token.len());
}
