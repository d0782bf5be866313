use crate::dictionary::{Dictionary, LexiconKind, MODEL_MAGIC};
use crate::errors::SampanError;
use crate::token::Token;
use crate::Tokenizer;

const MAIN_DIC: &str = include_str!("./resources/main.dic");
const QUANTIFIER_DIC: &str = include_str!("./resources/quantifier.dic");
const STOPWORD_DIC: &str = include_str!("./resources/stopword.dic");
const EXT_DIC: &str = include_str!("./resources/ext.dic");
const DISABLED_DIC: &str = include_str!("./resources/disabled.dic");

fn build_dict() -> Dictionary {
    Dictionary::from_readers(
        MAIN_DIC.as_bytes(),
        QUANTIFIER_DIC.as_bytes(),
        STOPWORD_DIC.as_bytes(),
    )
    .unwrap()
}

fn tokenize(tokenizer: &Tokenizer, text: &str) -> Vec<Token> {
    tokenizer.new_worker(text.as_bytes()).collect()
}

#[test]
fn test_load_lists() {
    let dict = build_dict();
    assert_eq!(dict.lexicon(LexiconKind::Main).num_words(), 31);
    assert_eq!(dict.lexicon(LexiconKind::Quantifier).num_words(), 7);
    assert_eq!(dict.lexicon(LexiconKind::StopWord).num_words(), 4);
    assert!(dict.lexicon(LexiconKind::Surname).is_empty());
}

#[test]
fn test_extension_list() {
    let dict = build_dict()
        .words_from_reader(LexiconKind::Main, EXT_DIC.as_bytes())
        .unwrap();
    let main = dict.lexicon(LexiconKind::Main);
    assert!(main.contains("甲骨文"));
    assert!(main.contains("长城"));
    assert_eq!(main.num_words(), 33);

    let tokenizer = Tokenizer::new(dict).smart(true);
    let tokens = tokenize(&tokenizer, "长城和甲骨文");
    let surfaces: Vec<_> = tokens.iter().map(|t| t.surface()).collect();
    assert_eq!(surfaces, vec!["长城", "甲骨文"]);
}

#[test]
fn test_disabled_list() {
    let dict = build_dict()
        .disabled_words_from_reader(LexiconKind::Main, DISABLED_DIC.as_bytes())
        .unwrap();
    let main = dict.lexicon(LexiconKind::Main);
    assert!(!main.contains("中华"));
    assert!(main.contains("中华人民"));

    let text: Vec<char> = "中华".chars().collect();
    let hit = main.match_at(&text, 0, 2);
    assert!(!hit.is_match());
    assert!(hit.is_prefix());

    let tokenizer = Tokenizer::new(dict);
    let tokens = tokenize(&tokenizer, "中华");
    let surfaces: Vec<_> = tokens.iter().map(|t| t.surface()).collect();
    assert_eq!(surfaces, vec!["中", "华"]);
}

#[test]
fn test_write_read() {
    let dict = build_dict();
    let text = "研究生命起源，北京大学生在2005年的3个中文分词器";
    let expected = tokenize(&Tokenizer::new(build_dict()).smart(true), text);

    let mut data = vec![];
    dict.write(&mut data).unwrap();
    assert!(data.starts_with(MODEL_MAGIC));

    let other = Dictionary::read(data.as_slice()).unwrap();
    assert_eq!(other.lexicon(LexiconKind::Main).num_words(), 31);
    let tokenizer = Tokenizer::new(other).smart(true);
    assert_eq!(tokenize(&tokenizer, text), expected);
}

#[test]
fn test_read_magic_mismatch() {
    let mut data = vec![];
    build_dict().write(&mut data).unwrap();
    data[0] ^= 0xFF;
    match Dictionary::read(data.as_slice()) {
        Err(SampanError::InvalidArgument(e)) => assert_eq!(e.arg, "rdr"),
        _ => panic!("an InvalidArgument error is expected"),
    }
}

#[test]
fn test_read_truncated() {
    let mut data = vec![];
    build_dict().write(&mut data).unwrap();
    data.truncate(MODEL_MAGIC.len() + 8);
    assert!(Dictionary::read(data.as_slice()).is_err());
    assert!(Dictionary::read(&MODEL_MAGIC[..4]).is_err());
}
