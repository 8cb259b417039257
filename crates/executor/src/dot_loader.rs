use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::error::Error;
use super::types::{GraphSource, LabelGraph};
use common::types::{Edge, Weight, parse_weight_or};
use graph_solver_core::Graph;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Id(String),
    DirectedOp,
    UndirectedOp,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Equals,
    Semicolon,
    Comma,
}

/// Splits DOT text into tokens tagged with their 1-based line number.
///
/// Handles `//`, `#` and `/* */` comments, double-quoted strings with `\"`
/// escapes, and signed numerals such as `-3` (as opposed to the `--` edge op).
fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, Error> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '#' => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let start = line;
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == '\n' {
                        line += 1;
                    } else if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(Error::parse(start, "unterminated block comment"));
                }
            }
            '"' => {
                let start = line;
                let mut value = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' if chars.peek() == Some(&'"') => {
                            chars.next();
                            value.push('"');
                        }
                        '\n' => {
                            line += 1;
                            value.push(c);
                        }
                        _ => value.push(c),
                    }
                }
                if !closed {
                    return Err(Error::parse(start, "unterminated string"));
                }
                tokens.push((Token::Id(value), start));
            }
            '-' if chars.peek() == Some(&'>') => {
                chars.next();
                tokens.push((Token::DirectedOp, line));
            }
            '-' if chars.peek() == Some(&'-') => {
                chars.next();
                tokens.push((Token::UndirectedOp, line));
            }
            '[' => tokens.push((Token::LBracket, line)),
            ']' => tokens.push((Token::RBracket, line)),
            '{' => tokens.push((Token::LBrace, line)),
            '}' => tokens.push((Token::RBrace, line)),
            '=' => tokens.push((Token::Equals, line)),
            ';' => tokens.push((Token::Semicolon, line)),
            ',' => tokens.push((Token::Comma, line)),
            c if is_id_char(c) || c == '-' => {
                let mut value = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !is_id_char(next) {
                        break;
                    }
                    value.push(next);
                    chars.next();
                }
                if value == "-" {
                    return Err(Error::parse(line, "stray '-'"));
                }
                tokens.push((Token::Id(value), line));
            }
            other => {
                return Err(Error::parse(line, format!("unexpected character '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

fn is_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Nodes and edges read from a DOT document, before weights are resolved.
#[derive(Debug, Default, PartialEq)]
pub struct DotDocument {
    pub directed: bool,
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String, BTreeMap<String, String>)>,
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(1, |(_, l)| *l)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), Error> {
        let line = self.line();
        match self.next() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(Error::parse(line, format!("expected {:?}, found {:?}", expected, t))),
            None => Err(Error::parse(line, format!("expected {:?}, found end of input", expected))),
        }
    }

    fn id(&mut self) -> Result<String, Error> {
        let line = self.line();
        match self.next() {
            Some(Token::Id(id)) => Ok(id),
            Some(t) => Err(Error::parse(line, format!("expected identifier, found {:?}", t))),
            None => Err(Error::parse(line, "expected identifier, found end of input")),
        }
    }

    fn keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), Some(Token::Id(id)) if id.eq_ignore_ascii_case(kw))
    }

    /// One or more `[key=value, ...]` lists; later keys override earlier ones.
    fn attributes(&mut self) -> Result<BTreeMap<String, String>, Error> {
        let mut attrs = BTreeMap::new();

        while self.peek() == Some(&Token::LBracket) {
            self.next();
            loop {
                match self.peek() {
                    Some(Token::RBracket) => {
                        self.next();
                        break;
                    }
                    Some(Token::Comma) | Some(Token::Semicolon) => {
                        self.next();
                    }
                    _ => {
                        let key = self.id()?;
                        self.expect(Token::Equals)?;
                        let value = self.id()?;
                        attrs.insert(key.to_ascii_lowercase(), value);
                    }
                }
            }
        }

        Ok(attrs)
    }

    fn document(mut self) -> Result<DotDocument, Error> {
        if self.keyword("strict") {
            self.next();
        }

        let directed = if self.keyword("digraph") {
            true
        } else if self.keyword("graph") {
            false
        } else {
            return Err(Error::parse(self.line(), "expected 'graph' or 'digraph'"));
        };
        self.next();

        if matches!(self.peek(), Some(Token::Id(_))) {
            self.next(); // graph name
        }
        self.expect(Token::LBrace)?;

        let mut doc = DotDocument {
            directed,
            ..Default::default()
        };

        loop {
            match self.peek() {
                None => return Err(Error::parse(self.line(), "missing closing '}'")),
                Some(Token::RBrace) => {
                    self.next();
                    break;
                }
                Some(Token::Semicolon) => {
                    self.next();
                }
                Some(Token::LBrace) => {
                    return Err(Error::parse(self.line(), "subgraphs are not supported"));
                }
                Some(Token::Id(_)) if self.keyword("subgraph") => {
                    return Err(Error::parse(self.line(), "subgraphs are not supported"));
                }
                Some(Token::Id(_))
                    if (self.keyword("node") || self.keyword("edge") || self.keyword("graph"))
                        && self.tokens.get(self.pos + 1).map(|(t, _)| t)
                            == Some(&Token::LBracket) =>
                {
                    // Default attribute statements carry no graph structure.
                    self.next();
                    self.attributes()?;
                }
                Some(Token::Id(_)) => self.statement(&mut doc)?,
                Some(other) => {
                    return Err(Error::parse(self.line(), format!("unexpected {:?}", other)));
                }
            }
        }

        if self.peek().is_some() {
            return Err(Error::parse(self.line(), "trailing input after closing '}'"));
        }

        Ok(doc)
    }

    /// `a = b`, `a [attrs]`, or an edge chain `a -> b -> c [attrs]`.
    fn statement(&mut self, doc: &mut DotDocument) -> Result<(), Error> {
        let first = self.id()?;

        if self.peek() == Some(&Token::Equals) {
            self.next();
            self.id()?;
            return Ok(());
        }

        let mut chain = vec![first];
        loop {
            let line = self.line();
            match self.peek() {
                Some(Token::DirectedOp) if !doc.directed => {
                    return Err(Error::parse(line, "'->' used in an undirected graph"));
                }
                Some(Token::UndirectedOp) if doc.directed => {
                    return Err(Error::parse(line, "'--' used in a directed graph"));
                }
                Some(Token::DirectedOp) | Some(Token::UndirectedOp) => {
                    self.next();
                    chain.push(self.id()?);
                }
                _ => break,
            }
        }

        let attrs = self.attributes()?;

        for pair in chain.windows(2) {
            doc.edges
                .push((pair[0].clone(), pair[1].clone(), attrs.clone()));
        }
        doc.nodes.extend(chain);

        Ok(())
    }
}

/// Parses a DOT document into its nodes and edges.
pub fn parse_dot(input: &str) -> Result<DotDocument, Error> {
    let parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    parser.document()
}

/// Builds a graph from DOT text. Each edge's weight comes from its `label`
/// attribute, else its `weight` attribute, else `default_weight`.
pub fn graph_from_dot(input: &str, default_weight: Weight) -> Result<LabelGraph, Error> {
    let doc = parse_dot(input)?;

    let edges = doc
        .edges
        .into_iter()
        .map(|(u, v, attrs)| {
            let raw = attrs.get("label").or_else(|| attrs.get("weight"));
            let weight = parse_weight_or(raw.map(String::as_str), default_weight);
            Edge::new(u, v, weight)
        })
        .collect();

    Ok(Graph::new(doc.directed, doc.nodes, edges)?)
}

/// Loads a graph from a `.gv`/`.dot` file.
pub struct DotLoader {
    path: PathBuf,
    default_weight: Weight,
}

impl DotLoader {
    pub fn new(path: PathBuf, default_weight: Weight) -> Self {
        DotLoader {
            path,
            default_weight,
        }
    }
}

impl GraphSource for DotLoader {
    fn load(&self) -> Result<LabelGraph, Error> {
        let text = fs::read_to_string(&self.path)?;
        let graph = graph_from_dot(&text, self.default_weight)?;
        debug!(path = %self.path.display(), nodes = graph.node_count(), "dot file parsed");
        Ok(graph)
    }
}
