use umber_css3::byte_stream::CodePointStream;
use umber_css3::tokenizer::{Number, TokenType};
use umber_css3::{tokenize, tokenize_str};

const STYLESHEET: &str = r#"
/* a small but representative sheet */
@media screen and (min-width: 42rem) {
    .menu > li[data-state="open"]::before {
        content: "\201C";
        margin: 0 auto -1px;
        width: 33.3%;
        background: url( ../img/dot.png ) no-repeat;
        transform: rotate(45deg);
    }
}
"#;

#[test]
fn decoder_output_contains_no_filtered_code_points() {
    let buffers: Vec<&[u8]> = vec![
        b"plain ascii",
        b"line\r\nendings\rand\x0Cfeeds",
        b"\xEF\xBB\xBFbom then \xC3\xA9 accents",
        b"broken \xC3 multi\xE2\x82 bytes \xF0\x9F\xA6",
        b"surrogate \xED\xA0\x80 encoding",
        b"overlong \xC0\xAF sequence",
        b"\x7Fdel and \xF4\x90\x80\x80 beyond max",
    ];

    for buffer in buffers {
        let stream = CodePointStream::from_bytes(buffer).expect("decode failed");
        for &c in stream.as_slice() {
            assert!(!(0xD800..=0xDFFF).contains(&(c as u32)), "surrogate leaked");
            assert_ne!(c, '\u{000C}', "form feed survived preprocessing");
            assert_ne!(c, '\u{000D}', "carriage return survived preprocessing");
            assert_ne!(c, '\u{0000}', "nul survived preprocessing");
        }
    }
}

#[test]
fn unterminated_comment_fails_the_run() {
    assert!(tokenize_str("/*").is_err());
    assert!(tokenize_str("a { } /* trailing").is_err());
    assert!(tokenize_str("/* almost closed *").is_err());

    assert!(tokenize_str("/* closed */ a").is_ok());
}

#[test]
fn plain_ascii_never_produces_bad_tokens() {
    let inputs = [
        "abc def 123",
        "margin 10 px",
        "a\nb\tc d",
        "0 1 2 3 4 5 6 7 8 9",
    ];

    for input in inputs {
        let tokens = tokenize_str(input).expect("tokenization failed");
        for token in &tokens {
            assert!(
                !matches!(token.token_type, TokenType::BadString | TokenType::BadUrl),
                "{input:?} produced {token:?}"
            );
        }
    }
}

#[test]
fn integer_round_trip() {
    // anything within 52 bits survives serialize + retokenize unchanged
    let values: Vec<i64> = vec![0, 1, 42, 4096, 999_999_937, 1 << 52, (1 << 52) - 1];

    for value in values {
        let tokens = tokenize_str(&value.to_string()).expect("tokenization failed");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::Number(Number::Integer(value)));
    }
}

#[test]
fn concatenation_at_whitespace_boundaries() {
    let a = "12px solid ";
    let b = "url(x.png) center";

    let tokens_a = tokenize_str(a).expect("tokenization failed");
    let combined = tokenize_str(&format!("{a}{b}")).expect("tokenization failed");

    // every token produced from `a` alone reappears unchanged as a prefix of
    // the combined run
    for (have, want) in combined.iter().zip(tokens_a.iter()) {
        assert_eq!(have.token_type, want.token_type);
    }
}

#[test]
fn bad_url_realigns_the_token_stream() {
    let tokens = tokenize_str("url(a(b) x;").expect("tokenization failed");

    assert_eq!(tokens[0].token_type, TokenType::BadUrl);
    assert_eq!(tokens[1].token_type, TokenType::Whitespace);
    assert_eq!(tokens[2].token_type, TokenType::Ident("x".into()));
    assert_eq!(tokens[3].token_type, TokenType::Semicolon);
}

#[test]
fn crlf_input_tokenizes_like_lf_input() {
    let crlf = tokenize(b"a{\r\ncolor:red;\r\n}").expect("tokenization failed");
    let lf = tokenize(b"a{\ncolor:red;\n}").expect("tokenization failed");

    assert_eq!(crlf, lf);
}

#[test]
fn tokenize_a_stylesheet() {
    // surface recoverable parse errors while the suite runs
    let _ = simple_logger::SimpleLogger::new().init();

    let tokens = tokenize_str(STYLESHEET).expect("tokenization failed");
    assert!(!tokens.is_empty());

    // spot checks across the sheet
    assert!(tokens
        .iter()
        .any(|t| t.token_type == TokenType::AtKeyword("media".into())));
    assert!(tokens
        .iter()
        .any(|t| t.token_type == TokenType::Url("../img/dot.png".into())));
    assert!(tokens
        .iter()
        .any(|t| t.token_type == TokenType::Function("rotate".into())));
    assert!(tokens
        .iter()
        .any(|t| t.token_type == TokenType::QuotedString("\u{201C}".into())));
    assert!(tokens.iter().any(|t| matches!(
        &t.token_type,
        TokenType::Dimension { value: Number::Integer(42), unit } if unit == "rem"
    )));
    assert!(tokens.iter().any(|t| matches!(
        &t.token_type,
        TokenType::Dimension { value: Number::Integer(45), unit } if unit == "deg"
    )));
    assert!(tokens.iter().any(|t| matches!(
        &t.token_type,
        TokenType::Dimension { value: Number::Integer(-1), unit } if unit == "px"
    )));
    assert!(tokens.iter().any(|t| matches!(
        &t.token_type,
        TokenType::Percentage(Number::Real(p)) if (p - 33.3).abs() < 1e-9
    )));

    // no recovery tokens in a well-formed sheet
    assert!(!tokens
        .iter()
        .any(|t| matches!(t.token_type, TokenType::BadString | TokenType::BadUrl)));
}

#[test]
fn tokens_appear_in_source_order() {
    let tokens = tokenize_str("a b { c: 1px; }").expect("tokenization failed");

    let mut last_offset = 0;
    for token in &tokens {
        assert!(
            token.location.offset >= last_offset,
            "token {token:?} moved backwards"
        );
        last_offset = token.location.offset;
    }
}
