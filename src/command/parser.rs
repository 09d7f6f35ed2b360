use super::PickCommand;

/// Default parsed form of one refresh's raw input.
///
/// Grammar:
/// - `text` - whole-row query
/// - `seg0 | seg1 | ...` - column filters, one per searchable column
/// - `... / CODE` - fast select, optionally followed by a row code
///
/// `\|`, `\/` and `\\` escape the literal character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    filters: Vec<String>,
    column_filtering: bool,
    fast_select: bool,
    fast_select_code: Option<String>,
    blank: bool,
}

impl Command {
    /// Filter segments in searchable-column order
    pub fn filters(&self) -> &[String] {
        &self.filters
    }
}

impl PickCommand for Command {
    fn parse(input: &str) -> Self {
        CommandParser::new(input).parse()
    }

    fn is_blank(&self) -> bool {
        self.blank
    }

    fn is_column_filtering(&self) -> bool {
        self.column_filtering
    }

    fn column_filter(&self, k: usize) -> &str {
        self.filters.get(k).map(String::as_str).unwrap_or("")
    }

    fn is_fast_select(&self) -> bool {
        self.fast_select
    }

    fn fast_select_code(&self) -> Option<&str> {
        self.fast_select_code.as_deref()
    }

    fn is_filter_equal(&self, other: &Self) -> bool {
        self.column_filtering == other.column_filtering && self.filters == other.filters
    }
}

/// Parse a raw input string into a [`Command`]
pub fn parse_command(input: &str) -> Command {
    Command::parse(input)
}

/// Single pass over the raw input
struct CommandParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> CommandParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(&mut self) -> Command {
        let mut filters = Vec::new();
        let mut current = String::new();
        let mut column_filtering = false;
        let mut fast_select = false;
        let mut fast_select_code = None;

        while let Some(ch) = self.peek_char() {
            self.advance();
            match ch {
                '\\' => match self.peek_char() {
                    Some(escaped @ ('|' | '/' | '\\')) => {
                        self.advance();
                        current.push(escaped);
                    }
                    _ => current.push('\\'),
                },
                '|' => {
                    column_filtering = true;
                    filters.push(std::mem::take(&mut current));
                }
                '/' => {
                    fast_select = true;
                    let code = self.rest().trim().to_ascii_uppercase();
                    if !code.is_empty() {
                        fast_select_code = Some(code);
                    }
                    break;
                }
                _ => current.push(ch),
            }
        }
        filters.push(current);

        Command {
            filters: filters.into_iter().map(|f| f.trim().to_string()).collect(),
            column_filtering,
            fast_select,
            fast_select_code,
            blank: self.input.trim().is_empty(),
        }
    }

    fn rest(&mut self) -> &'a str {
        let rest = &self.input[self.pos..];
        self.pos = self.input.len();
        rest
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }
}
