//! Token-walker that assembles compiled CSS into an ordered node list.
//!
//! The parser works on the spanned tokens from [`crate::css::tokenizer`],
//! slicing selector and declaration text straight out of the source so the
//! compiler's own spelling survives. It only has to understand the CSS a
//! Sass compiler emits; anything else is rejected with a positioned
//! [`CssError`].

use crate::css::node::{AtRuleBody, Declaration, Node, Position};
use crate::css::tokenizer::{tokenize, SpannedToken, Token};

/// Errors from reading compiled CSS.
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("unexpected `{found}` ({position})")]
    Unexpected { found: String, position: Position },
    #[error("declaration missing `:` ({position})")]
    MissingColon { position: Position },
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },
}

/// Parse compiled CSS text into an ordered node list.
pub fn parse_nodes(input: &str) -> Result<Vec<Node>, CssError> {
    let mut parser = NodeParser {
        src: input,
        tokens: tokenize(input),
        cursor: 0,
        lines: LineIndex::new(input),
    };
    parser.parse_block(true)
}

/// Maps byte offsets to 1-based line/column positions.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(src: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in src.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self { starts }
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.starts.partition_point(|start| *start <= offset);
        Position {
            line,
            column: offset - self.starts[line - 1] + 1,
        }
    }
}

struct NodeParser<'src> {
    src: &'src str,
    tokens: Vec<SpannedToken>,
    cursor: usize,
    lines: LineIndex,
}

impl NodeParser<'_> {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.cursor)
    }

    fn position_at(&self, offset: usize) -> Position {
        self.lines.position(offset)
    }

    /// Parse nodes until end of input (`top_level`) or a closing brace.
    ///
    /// `prelude` tracks the byte range of pending non-structural tokens: the
    /// selector or at-rule header that owns the next `{` or `;`.
    fn parse_block(&mut self, top_level: bool) -> Result<Vec<Node>, CssError> {
        let mut nodes = Vec::new();
        let mut prelude: Option<(usize, usize)> = None;

        loop {
            let Some(tok) = self.peek().cloned() else {
                return match (top_level, prelude) {
                    (true, None) => Ok(nodes),
                    (true, Some(_)) => Err(CssError::UnexpectedEof {
                        expected: "`{` or `;`".into(),
                    }),
                    (false, _) => Err(CssError::UnexpectedEof {
                        expected: "`}`".into(),
                    }),
                };
            };

            match tok.token {
                Token::Comment => {
                    self.cursor += 1;
                    // Comments interrupting a prelude are dropped.
                    if prelude.is_none() {
                        let text = self.src[tok.span.start + 2..tok.span.end - 2].to_string();
                        nodes.push(Node::Comment {
                            text,
                            position: Some(self.position_at(tok.span.start)),
                        });
                    }
                }
                Token::Text | Token::Slash | Token::DoubleQuoted | Token::SingleQuoted => {
                    self.cursor += 1;
                    prelude = Some(match prelude {
                        Some((start, _)) => (start, tok.span.end),
                        None => (tok.span.start, tok.span.end),
                    });
                }
                Token::Semicolon => {
                    self.cursor += 1;
                    if let Some((start, end)) = prelude.take() {
                        let text = &self.src[start..end];
                        if let Some(header) = text.strip_prefix('@') {
                            let (name, params) = split_at_rule_header(header);
                            nodes.push(Node::AtRule {
                                name,
                                params,
                                body: AtRuleBody::None,
                                position: Some(self.position_at(start)),
                            });
                        } else {
                            return Err(CssError::Unexpected {
                                found: ";".into(),
                                position: self.position_at(tok.span.start),
                            });
                        }
                    }
                    // a stray `;` with no prelude is tolerated
                }
                Token::BraceOpen => {
                    self.cursor += 1;
                    let Some((start, end)) = prelude.take() else {
                        return Err(CssError::Unexpected {
                            found: "{".into(),
                            position: self.position_at(tok.span.start),
                        });
                    };
                    let text = self.src[start..end].to_string();
                    let position = Some(self.position_at(start));
                    if let Some(header) = text.strip_prefix('@') {
                        let (name, params) = split_at_rule_header(header);
                        let body = if self.block_is_declarations() {
                            AtRuleBody::Declarations(self.parse_declarations()?)
                        } else {
                            AtRuleBody::Rules(self.parse_block(false)?)
                        };
                        nodes.push(Node::AtRule {
                            name,
                            params,
                            body,
                            position,
                        });
                    } else {
                        let selectors = text
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect();
                        let declarations = self.parse_declarations()?;
                        nodes.push(Node::Rule {
                            selectors,
                            declarations,
                            position,
                        });
                    }
                }
                Token::BraceClose => {
                    if top_level || prelude.is_some() {
                        return Err(CssError::Unexpected {
                            found: "}".into(),
                            position: self.position_at(tok.span.start),
                        });
                    }
                    self.cursor += 1;
                    return Ok(nodes);
                }
            }
        }
    }

    /// Decide whether an at-rule block holds declarations or nested rules by
    /// scanning ahead for the first structural token.
    fn block_is_declarations(&self) -> bool {
        let mut saw_text = false;
        for tok in &self.tokens[self.cursor..] {
            match tok.token {
                Token::BraceOpen => return false,
                Token::Semicolon => return true,
                Token::BraceClose => return saw_text,
                Token::Comment => {}
                _ => saw_text = true,
            }
        }
        saw_text
    }

    /// Parse `prop: value;` pairs up to and including the closing brace.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, CssError> {
        let mut declarations = Vec::new();
        let mut segment: Option<(usize, usize)> = None;

        loop {
            let Some(tok) = self.peek().cloned() else {
                return Err(CssError::UnexpectedEof {
                    expected: "`}`".into(),
                });
            };
            match tok.token {
                Token::Comment => {
                    self.cursor += 1;
                }
                Token::Semicolon => {
                    self.cursor += 1;
                    self.flush_declaration(segment.take(), &mut declarations)?;
                }
                Token::BraceClose => {
                    self.cursor += 1;
                    self.flush_declaration(segment.take(), &mut declarations)?;
                    return Ok(declarations);
                }
                Token::BraceOpen => {
                    return Err(CssError::Unexpected {
                        found: "{".into(),
                        position: self.position_at(tok.span.start),
                    });
                }
                _ => {
                    self.cursor += 1;
                    segment = Some(match segment {
                        Some((start, _)) => (start, tok.span.end),
                        None => (tok.span.start, tok.span.end),
                    });
                }
            }
        }
    }

    fn flush_declaration(
        &self,
        segment: Option<(usize, usize)>,
        declarations: &mut Vec<Declaration>,
    ) -> Result<(), CssError> {
        let Some((start, end)) = segment else {
            return Ok(());
        };
        let text = &self.src[start..end];
        let Some((property, value)) = text.split_once(':') else {
            return Err(CssError::MissingColon {
                position: self.position_at(start),
            });
        };
        declarations.push(Declaration {
            property: property.trim().to_string(),
            value: value.trim().to_string(),
        });
        Ok(())
    }
}

/// Split `media (min-width: 10px)` into name and params.
fn split_at_rule_header(header: &str) -> (String, String) {
    match header.find(char::is_whitespace) {
        Some(at) => (header[..at].to_string(), header[at..].trim().to_string()),
        None => (header.to_string(), String::new()),
    }
}
