use std::fmt;

use umber_shared::byte_stream::{CodePointStream, Location, Stream, CHAR_LF};
use umber_shared::errors::{Error, Result};

use crate::unicode::{
    is_digit, is_hex_digit, is_ident, is_ident_start, is_non_printable, is_whitespace, UnicodeChar,
};

/// Numeric payload shared by `<number-token>`, `<percentage-token>` and
/// `<dimension-token>`. The "integer" type flag from the CSS syntax
/// specification is folded into the variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// The numeric value widened to a float
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(value) => *value as f64,
            Number::Real(value) => *value,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{value}"),
            Number::Real(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    Function(String),
    Url(String),
    /// A `<bad-url-token>`. The consumed remnants are not retained.
    BadUrl,
    Dimension {
        value: Number,
        unit: String,
    },
    Percentage(Number),
    Number(Number),
    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),
    /// A `<bad-string-token>`
    ///
    /// This token always indicates a parse error.
    BadString,
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram)
    Whitespace,
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "unrestricted"
    ///
    /// The value does not include the `#` marker.
    Hash(String),
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "id"
    ///
    /// The value does not include the `#` marker.
    ///
    /// Hash that is a valid ID selector.
    IDHash(String),
    /// A `<delim-token>`
    Delim(char),
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    /// A `<comma-token>`
    Comma,
    /// A `:` `<colon-token>`
    Colon,
    /// A `;` `<semicolon-token>`
    Semicolon,
    // A `<!--` `<CDO-token>`
    Cdo,
    // A `-->` `<CDC-token>`
    Cdc,
    // A `<EOF-token>`
    Eof,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Location of the token in the stream
    pub location: Location,
}

impl Token {
    /// Returns a new token for the given type on the given location
    fn new(token_type: TokenType, location: Location) -> Token {
        Token {
            token_type,
            location,
        }
    }

    pub fn new_delim(c: char, location: Location) -> Token {
        Token::new(TokenType::Delim(c), location)
    }

    pub fn new_id_hash(value: &str, location: Location) -> Token {
        Token::new(TokenType::IDHash(value.to_string()), location)
    }

    pub fn new_hash(value: &str, location: Location) -> Token {
        Token::new(TokenType::Hash(value.to_string()), location)
    }

    pub fn new_atkeyword(keyword: &str, location: Location) -> Token {
        Token::new(TokenType::AtKeyword(keyword.to_string()), location)
    }

    pub fn new_number(value: Number, location: Location) -> Token {
        Token::new(TokenType::Number(value), location)
    }

    pub fn new_percentage(value: Number, location: Location) -> Token {
        Token::new(TokenType::Percentage(value), location)
    }

    pub fn new_dimension(value: Number, unit: &str, location: Location) -> Token {
        Token::new(
            TokenType::Dimension {
                value,
                unit: unit.to_string(),
            },
            location,
        )
    }

    pub fn new_ident(value: &str, location: Location) -> Token {
        Token::new(TokenType::Ident(value.to_string()), location)
    }

    pub fn new_function(value: &str, location: Location) -> Token {
        Token::new(TokenType::Function(value.to_string()), location)
    }

    pub fn new_quoted_string(value: &str, location: Location) -> Token {
        Token::new(TokenType::QuotedString(value.to_string()), location)
    }

    pub fn new_bad_string(location: Location) -> Token {
        Token::new(TokenType::BadString, location)
    }

    pub fn new_url(value: &str, location: Location) -> Token {
        Token::new(TokenType::Url(value.to_string()), location)
    }

    pub fn new_bad_url(location: Location) -> Token {
        Token::new(TokenType::BadUrl, location)
    }
}

impl Token {
    pub fn is_comma(&self) -> bool {
        matches!(self.token_type, TokenType::Comma)
    }

    pub fn is_string(&self) -> bool {
        matches!(self.token_type, TokenType::QuotedString(_))
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.token_type, TokenType::Ident(_))
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    pub fn is_colon(&self) -> bool {
        matches!(self.token_type, TokenType::Colon)
    }

    pub fn is_delim(&self, delim: char) -> bool {
        matches!(self.token_type, TokenType::Delim(c) if c == delim)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match &self.token_type {
            TokenType::AtKeyword(val)
            | TokenType::Url(val)
            | TokenType::Hash(val)
            | TokenType::IDHash(val)
            | TokenType::Ident(val)
            | TokenType::Function(val)
            | TokenType::QuotedString(val) => val.clone(),
            TokenType::BadUrl | TokenType::BadString => String::new(),
            TokenType::Delim(val) => val.to_string(),
            TokenType::Number(val) => val.to_string(),
            TokenType::Percentage(val) => format!("{}%", val),
            TokenType::Dimension { value, unit } => format!("{}{}", value, unit),
            TokenType::Cdc => "-->".into(),
            TokenType::Cdo => "<!--".into(),
            TokenType::Colon => ":".into(),
            TokenType::Semicolon => ";".into(),
            TokenType::Comma => ",".into(),
            TokenType::LBracket => "[".into(),
            TokenType::RBracket => "]".into(),
            TokenType::LCurly => "{".into(),
            TokenType::RCurly => "}".into(),
            TokenType::LParen => "(".into(),
            TokenType::RParen => ")".into(),
            TokenType::Whitespace => " ".into(),
            TokenType::Eof => "eof".into(),
        };

        write!(f, "{string}")
    }
}

/// CSS tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
///
/// The tokenizer borrows a preprocessed code point stream and walks it
/// strictly forward; look-ahead never exceeds three code points beyond the
/// cursor and nothing already emitted is ever revisited.
pub struct Tokenizer<'stream> {
    stream: &'stream CodePointStream,
    /// Start position of the stream (this does not have to be 1/1)
    start_location: Location,
    /// Current position of the stream, to get the absolute position, we must add start_location to it
    cur_location: Location,
}

impl<'stream> Tokenizer<'stream> {
    /// Creates a new tokenizer with the given stream that starts on the given location. This does not
    /// have to be 1/1, but can be any location.
    pub fn new(stream: &'stream CodePointStream, location: Location) -> Self {
        Self {
            stream,
            start_location: location,
            cur_location: Location::default(),
        }
    }

    /// Returns the current location and takes the start location into account
    pub fn current_location(&self) -> Location {
        Location::new(
            self.start_location.line + self.cur_location.line - 1,
            self.start_location.column + self.cur_location.column - 1,
            self.cur_location.offset,
        )
    }

    /// Consumes tokens until the end of the stream and returns them in order
    /// of occurrence.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.consume_token()?;
            if token.token_type == TokenType::Eof {
                break;
            }

            log::trace!("{:?}", token);
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Result<Token> {
        self.consume_comments()?;

        let loc = self.current_location();

        let Some(current) = self.current_char() else {
            return Ok(Token::new(TokenType::Eof, loc));
        };

        let t = match current {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                Token::new(TokenType::Whitespace, loc)
            }
            '"' | '\'' => self.consume_string_token(),
            c @ '#' => {
                // consume '#'
                self.next_char();

                if matches!(self.current_char(), Some(c) if is_ident(c))
                    || self.is_start_of_escape(0)
                {
                    return Ok(if self.is_next_3_points_starts_ident_seq(0) {
                        Token::new_id_hash(self.consume_ident().as_str(), loc)
                    } else {
                        Token::new_hash(self.consume_ident().as_str(), loc)
                    });
                }

                Token::new_delim(c, loc)
            }
            '(' => {
                self.next_char();
                Token::new(TokenType::LParen, loc)
            }
            ')' => {
                self.next_char();
                Token::new(TokenType::RParen, loc)
            }
            '[' => {
                self.next_char();
                Token::new(TokenType::LBracket, loc)
            }
            ']' => {
                self.next_char();
                Token::new(TokenType::RBracket, loc)
            }
            '{' => {
                self.next_char();
                Token::new(TokenType::LCurly, loc)
            }
            '}' => {
                self.next_char();
                Token::new(TokenType::RCurly, loc)
            }
            ',' => {
                self.next_char();
                Token::new(TokenType::Comma, loc)
            }
            ':' => {
                self.next_char();
                Token::new(TokenType::Colon, loc)
            }
            ';' => {
                self.next_char();
                Token::new(TokenType::Semicolon, loc)
            }
            c @ '+' => {
                if self.is_start_of_number(0) {
                    return Ok(self.consume_numeric_token());
                }

                // consume '+'
                self.next_char();
                Token::new_delim(c, loc)
            }
            '.' => {
                if self.is_start_of_number(0) {
                    return Ok(self.consume_numeric_token());
                }

                // consume '.'
                self.next_char();
                Token::new_delim('.', loc)
            }
            c @ '-' => {
                if self.is_start_of_number(0) {
                    return Ok(self.consume_numeric_token());
                }

                if self.look_ahead_slice(3) == "-->" {
                    // consume '-->'
                    self.consume_chars(3);
                    return Ok(Token::new(TokenType::Cdc, loc));
                }

                if self.is_next_3_points_starts_ident_seq(0) {
                    return Ok(self.consume_ident_like_token());
                }

                // consume '-'
                self.next_char();
                Token::new_delim(c, loc)
            }
            c @ '<' => {
                if self.look_ahead_slice(4) == "<!--" {
                    // consume '<!--'
                    self.consume_chars(4);
                    return Ok(Token::new(TokenType::Cdo, loc));
                }

                // consume '<'
                self.next_char();
                Token::new_delim(c, loc)
            }
            c @ '@' => {
                // consume '@'
                self.next_char();

                if self.is_next_3_points_starts_ident_seq(0) {
                    return Ok(Token::new_atkeyword(self.consume_ident().as_str(), loc));
                }

                Token::new_delim(c, loc)
            }
            c @ '\\' => {
                if self.is_start_of_escape(0) {
                    return Ok(self.consume_ident_like_token());
                }

                log::warn!("parse error: invalid escape at {:?}", loc);

                // consume '\'
                self.next_char();
                Token::new_delim(c, loc)
            }
            c if is_digit(c) => self.consume_numeric_token(),
            c if is_ident_start(c) => self.consume_ident_like_token(),
            c => {
                self.next_char();
                Token::new(TokenType::Delim(c), loc)
            }
        };

        Ok(t)
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// A comment that is still open at the end of the input fails the whole
    /// run instead of getting the recovery most other constructs get.
    fn consume_comments(&mut self) -> Result<()> {
        while self.look_ahead_slice(2) == "/*" {
            let loc = self.current_location();

            // consume '/*'
            self.consume_chars(2);

            loop {
                if self.current_char().is_none() {
                    return Err(Error::UnterminatedComment(loc).into());
                }

                if self.look_ahead_slice(2) == "*/" {
                    // consume '*/'
                    self.consume_chars(2);
                    break;
                }

                self.next_char();
            }
        }

        Ok(())
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric_token(&mut self) -> Token {
        let loc = self.current_location();

        let number = self.consume_number();

        if self.is_next_3_points_starts_ident_seq(0) {
            let unit = self.consume_ident();
            return Token::new_dimension(number, unit.as_str(), loc);
        }

        if self.current_char() == Some('%') {
            // consume '%'
            self.next_char();
            return Token::new_percentage(number, loc);
        }

        Token::new_number(number, loc)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or `<bad-string-token>`.
    fn consume_string_token(&mut self) -> Token {
        let loc = self.current_location();

        // consume string starting: (') or (") ...
        let ending = self.next_char();
        let mut value = String::new();

        loop {
            let Some(c) = self.current_char() else {
                // eof is a parse error, but the string token is still produced
                log::warn!("parse error: eof in string at {:?}", self.current_location());
                return Token::new_quoted_string(value.as_str(), loc);
            };

            if Some(c) == ending {
                // consume string ending
                self.next_char();
                return Token::new_quoted_string(value.as_str(), loc);
            }

            match c {
                CHAR_LF => {
                    // note: don't consume '\n'
                    log::warn!(
                        "parse error: newline in string at {:?}",
                        self.current_location()
                    );
                    return Token::new_bad_string(loc);
                }
                '\\' => {
                    // consume '\'
                    self.next_char();

                    match self.current_char() {
                        // a dangling '\' at eof is dropped; the next pass
                        // emits the string token
                        None => {}
                        Some(CHAR_LF) => {
                            // an escaped newline joins two physical lines
                            self.next_char();
                        }
                        Some(_) => value.push(self.consume_escaped_code_point()),
                    }
                }
                _ => {
                    value.push(c);
                    self.next_char();
                }
            }
        }
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> Number {
        let mut repr = String::new();
        let mut is_integer = true;

        if let Some(c @ ('+' | '-')) = self.current_char() {
            repr.push(c);
            self.next_char();
        }

        repr.push_str(&self.consume_digits());

        if self.current_char() == Some('.')
            && matches!(self.look_ahead(1), Some(c) if is_digit(c))
        {
            repr.push_str(&self.consume_chars(2));
            is_integer = false;
            repr.push_str(&self.consume_digits());
        }

        let c1 = self.current_char();
        let c2 = self.look_ahead(1);
        let c3 = self.look_ahead(2);
        if matches!(c1, Some('E' | 'e')) {
            if matches!(c2, Some(c) if is_digit(c)) {
                repr.push_str(&self.consume_chars(2));
                is_integer = false;
                repr.push_str(&self.consume_digits());
            } else if matches!(c2, Some('+' | '-')) && matches!(c3, Some(c) if is_digit(c)) {
                repr.push_str(&self.consume_chars(3));
                is_integer = false;
                repr.push_str(&self.consume_digits());
            }
        }

        convert_string_to_number(repr.as_str(), is_integer)
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns: `<ident-token>`, `<function-token>`, `<url-token>`, or `<bad-url-token>`.
    fn consume_ident_like_token(&mut self) -> Token {
        let loc = self.current_location();

        let value = self.consume_ident();

        if value.eq_ignore_ascii_case("url") && self.current_char() == Some('(') {
            // consume '('
            self.next_char();

            while matches!(self.current_char(), Some(c1) if is_whitespace(c1))
                && matches!(self.look_ahead(1), Some(c2) if is_whitespace(c2))
            {
                self.next_char();
            }

            let n1 = self.current_char();
            let n2 = self.look_ahead(1);
            if matches!(n1, Some('"' | '\''))
                || (matches!(n1, Some(c) if is_whitespace(c)) && matches!(n2, Some('"' | '\'')))
            {
                return Token::new_function(value.as_str(), loc);
            }

            return self.consume_url(loc);
        }

        if self.current_char() == Some('(') {
            // consume '('
            self.next_char();
            return Token::new_function(value.as_str(), loc);
        }

        Token::new_ident(value.as_str(), loc)
    }

    /// 4.3.6. [Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-a-url-token)
    ///
    /// Returns either a `<url-token>` or a `<bad-url-token>`
    fn consume_url(&mut self, loc: Location) -> Token {
        let mut url = String::new();

        self.consume_whitespace();

        loop {
            let Some(c) = self.next_char() else {
                // parse error, but the url token is still produced
                log::warn!("parse error: eof in url at {:?}", self.current_location());
                return Token::new_url(url.as_str(), loc);
            };

            match c {
                ')' => return Token::new_url(url.as_str(), loc),
                c if is_whitespace(c) => {
                    self.consume_whitespace();

                    match self.current_char() {
                        Some(')') => {
                            // consume ')'
                            self.next_char();
                            return Token::new_url(url.as_str(), loc);
                        }
                        None => {
                            log::warn!("parse error: eof in url at {:?}", self.current_location());
                            return Token::new_url(url.as_str(), loc);
                        }
                        _ => {
                            self.consume_remnants_of_bad_url();
                            return Token::new_bad_url(loc);
                        }
                    }
                }
                '"' | '\'' | '(' => {
                    log::warn!(
                        "parse error: unexpected {c:?} in url at {:?}",
                        self.current_location()
                    );
                    self.consume_remnants_of_bad_url();
                    return Token::new_bad_url(loc);
                }
                c if is_non_printable(c) => {
                    log::warn!(
                        "parse error: non-printable code point in url at {:?}",
                        self.current_location()
                    );
                    self.consume_remnants_of_bad_url();
                    return Token::new_bad_url(loc);
                }
                '\\' => {
                    // the '\' is consumed; only a newline right after it makes
                    // the escape invalid
                    if self.current_char() == Some(CHAR_LF) {
                        log::warn!(
                            "parse error: invalid escape in url at {:?}",
                            self.current_location()
                        );
                        self.consume_remnants_of_bad_url();
                        return Token::new_bad_url(loc);
                    }

                    url.push(self.consume_escaped_code_point());
                }
                c => url.push(c),
            }
        }
    }

    /// 4.3.14. [Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// Consumes enough of the input stream to reach a recovery point where
    /// normal tokenizing can resume. Escapes are interpreted so an escaped
    /// `)` does not end the token early.
    fn consume_remnants_of_bad_url(&mut self) {
        loop {
            match self.current_char() {
                None => return,
                Some(')') => {
                    // recovery point
                    self.next_char();
                    return;
                }
                _ if self.is_start_of_escape(0) => {
                    // consume '\'
                    self.next_char();
                    self.consume_escaped_code_point();
                }
                _ => {
                    self.next_char();
                }
            }
        }
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-an-escaped-code-point)
    ///
    /// The `\` itself is already consumed; the cursor points at what follows it.
    fn consume_escaped_code_point(&mut self) -> char {
        let Some(c) = self.current_char() else {
            log::warn!("parse error: eof in escape at {:?}", self.current_location());
            return UnicodeChar::REPLACEMENT_CHARACTER;
        };

        if !is_hex_digit(c) {
            self.next_char();
            return c;
        }

        let mut value: u32 = 0;
        let mut digits = 0;
        while digits < 6 {
            match self.current_char() {
                Some(h) if is_hex_digit(h) => {
                    value = (value << 4) | h.to_digit(16).unwrap_or(0);
                    digits += 1;
                    self.next_char();
                }
                _ => break,
            }
        }

        if matches!(self.current_char(), Some(c) if is_whitespace(c)) {
            self.next_char();
        }

        if value == 0 {
            return UnicodeChar::REPLACEMENT_CHARACTER;
        }

        // from_u32 rejects surrogates and anything past U+10FFFF
        char::from_u32(value).unwrap_or(UnicodeChar::REPLACEMENT_CHARACTER)
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// Note: that algorithm does not do the verification that are necessary to
    /// ensure the returned code points would constitute an <ident-token>.
    /// Caller should ensure that the stream starts with an ident sequence before calling this
    /// algorithm.
    fn consume_ident(&mut self) -> String {
        let mut value = String::new();

        loop {
            match self.current_char() {
                Some(c) if is_ident(c) => {
                    value.push(c);
                    self.next_char();
                }
                _ if self.is_start_of_escape(0) => {
                    // consume '\'
                    self.next_char();
                    value.push(self.consume_escaped_code_point());
                }
                _ => break,
            }
        }

        value
    }

    fn consume_digits(&mut self) -> String {
        let mut value = String::new();

        while matches!(self.current_char(), Some(c) if is_digit(c)) {
            if let Some(c) = self.next_char() {
                value.push(c);
            }
        }

        value
    }

    fn consume_chars(&mut self, mut len: usize) -> String {
        let mut value = String::new();

        while len > 0 {
            if let Some(c) = self.next_char() {
                value.push(c);
            }
            len -= 1;
        }

        value
    }

    fn consume_whitespace(&mut self) {
        while matches!(self.current_char(), Some(c) if is_whitespace(c)) {
            self.next_char();
        }
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    ///
    /// End of input after the `\` still counts; only a newline does not.
    fn is_start_of_escape(&self, start: usize) -> bool {
        self.look_ahead(start) == Some('\\') && self.look_ahead(start + 1) != Some(CHAR_LF)
    }

    /// 4.3.9. [Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#check-if-three-code-points-would-start-an-ident-sequence)
    fn is_next_3_points_starts_ident_seq(&self, start: usize) -> bool {
        let first = self.look_ahead(start);
        let second = self.look_ahead(start + 1);

        match first {
            Some('-') => {
                matches!(second, Some(c) if is_ident_start(c))
                    || second == Some('-')
                    || self.is_start_of_escape(start + 1)
            }
            Some('\\') => self.is_start_of_escape(start),
            Some(c) => is_ident_start(c),
            None => false,
        }
    }

    /// 4.3.10. [Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn is_start_of_number(&self, start: usize) -> bool {
        match self.look_ahead(start) {
            Some('+' | '-') => {
                matches!(self.look_ahead(start + 1), Some(c) if is_digit(c))
                    || (self.look_ahead(start + 1) == Some('.')
                        && matches!(self.look_ahead(start + 2), Some(c) if is_digit(c)))
            }
            Some('.') => matches!(self.look_ahead(start + 1), Some(c) if is_digit(c)),
            Some(c) => is_digit(c),
            None => false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.stream.look_ahead(0)
    }

    fn look_ahead(&self, offset: usize) -> Option<char> {
        self.stream.look_ahead(offset)
    }

    fn look_ahead_slice(&self, len: usize) -> String {
        let mut s = String::new();

        for i in 0..len {
            match self.stream.look_ahead(i) {
                Some(c) => s.push(c),
                None => break,
            }
        }

        s
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.stream.read_and_next()?;

        self.cur_location.offset += 1;
        if c == CHAR_LF {
            self.cur_location.line += 1;
            self.cur_location.column = 1;
        } else {
            self.cur_location.column += 1;
        }

        Some(c)
    }
}

// 10^exp by repeated multiplication. Exact up to 10^22 and deterministic on
// every platform, which f64::powi does not guarantee.
fn pow10(exp: i32) -> f64 {
    let mut result = 1.0_f64;
    for _ in 0..exp {
        result *= 10.0;
        if result.is_infinite() {
            break;
        }
    }
    result
}

/// [Convert a string to a number](https://www.w3.org/TR/css-syntax-3/#convert-string-to-number)
///
/// The representation has already been vetted by `consume_number`, so the
/// components are parsed positionally instead of deferring to `str::parse`.
/// The result is `s * (i + f * 10^(-d)) * 10^(t*e)`; integer results saturate
/// at the i64 range.
fn convert_string_to_number(repr: &str, is_integer: bool) -> Number {
    let mut chars = repr.chars().peekable();

    // s: sign
    let s: i64 = match chars.peek() {
        Some('-') => {
            chars.next();
            -1
        }
        Some('+') => {
            chars.next();
            1
        }
        _ => 1,
    };

    // i: integer part
    let mut i: i64 = 0;
    while let Some(c) = chars.peek().copied() {
        if !is_digit(c) {
            break;
        }
        chars.next();
        i = i
            .saturating_mul(10)
            .saturating_add(i64::from(c as u32 - '0' as u32));
    }

    // f: fractional part as an integer, d: number of fractional digits
    let mut f: i64 = 0;
    let mut d: i32 = 0;
    if chars.peek() == Some(&'.') {
        chars.next();
        while let Some(c) = chars.peek().copied() {
            if !is_digit(c) {
                break;
            }
            chars.next();
            f = f
                .saturating_mul(10)
                .saturating_add(i64::from(c as u32 - '0' as u32));
            d += 1;
        }
    }

    // t: exponent sign, e: exponent magnitude
    let mut t: i32 = 1;
    let mut e: i32 = 0;
    if matches!(chars.peek(), Some('E' | 'e')) {
        chars.next();
        match chars.peek() {
            Some('-') => {
                chars.next();
                t = -1;
            }
            Some('+') => {
                chars.next();
            }
            _ => {}
        }
        while let Some(c) = chars.peek().copied() {
            if !is_digit(c) {
                break;
            }
            chars.next();
            e = e.saturating_mul(10).saturating_add((c as u32 - '0' as u32) as i32);
        }
    }

    if is_integer {
        // an exponent clears the integer flag in consume_number, so e is only
        // nonzero here for callers converting a raw representation; nineteen
        // multiplications saturate any nonzero i64
        let mut result = s.saturating_mul(i);
        for _ in 0..e.min(19) {
            result = result.saturating_mul(10);
        }
        return Number::Integer(result);
    }

    // f * 10^(-d) expressed as a division so the power stays exact
    let mut value = i as f64 + f as f64 / pow10(d);
    if t >= 0 {
        value *= pow10(e);
    } else {
        value /= pow10(e);
    }
    Number::Real(s as f64 * value)
}
