//! Linguistic analysis: tokenizer, noun-phrase chunker and gazetteer
//! entity recognizer.
//!
//! A [`LanguageModel`] is built once and shared read-only. The chunker
//! (`parser` pipe) and the recognizer (`ner` pipe) are optional; the
//! tokenizer is always present.

use crate::config::{AnalysisConfig, Pipe};
use crate::error::{Result, ResumeMatcherError};
use crate::processing::vocabulary::Vocabulary;
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// English stop words
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "both", "bottom", "but", "by",
    "call", "can", "cannot", "ca", "could", "did", "do", "does", "doing", "done", "down",
    "due", "during", "each", "eight", "either", "eleven", "else", "elsewhere", "empty",
    "enough", "even", "ever", "every", "everyone", "everything", "everywhere", "except",
    "few", "fifteen", "fifty", "first", "five", "for", "former", "formerly", "forty",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "have",
    "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
    "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
    "indeed", "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly",
    "least", "less", "just", "made", "make", "many", "may", "me", "meanwhile", "might",
    "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my", "myself",
    "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no", "nobody",
    "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "quite",
    "rather", "re", "really", "regarding", "same", "say", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "under", "until", "up",
    "unless", "upon", "us", "used", "using", "various", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves", "'d", "'ll", "'m", "'re", "'s", "'ve", "n't",
];

/// Verbs and adverbs that end a noun phrase
const PHRASE_BREAKERS: &[&str] = &[
    "use", "uses", "need", "needs", "needed", "work", "works", "worked", "working",
    "build", "builds", "built", "building", "develop", "develops", "developed",
    "developing", "design", "designed", "designing", "manage", "managed", "managing",
    "lead", "led", "leading", "create", "created", "creating", "maintain", "maintained",
    "maintaining", "implement", "implemented", "implementing", "write", "wrote",
    "written", "writing", "know", "knows", "knew", "seeking", "looking", "join",
    "require", "requires", "required", "prefer", "preferred", "include", "includes",
    "including", "daily", "strongly", "highly", "etc",
];

/// Emails, URLs and hyphenated version strings kept whole by the tokenizer
const SPECIAL_TOKEN_PATTERN: &str = concat!(
    r"(?i)(?P<email>[\w.+-]+@[\w-]+(?:\.[\w-]+)+)",
    r"|(?P<url>(?:https?://|www\.)\S+|[\w-]+(?:\.[\w-]+)*\.(?:com|org|edu|gov)\b(?:/\S*)?)",
    r"|(?P<version>\p{L}[\p{L}\p{N}_]*-\p{N}[\p{L}\p{N}._-]*)",
);

/// Built-in named entities beyond the skill vocabulary
const GAZETTEER: &[(&str, EntityLabel)] = &[
    ("google", EntityLabel::Org),
    ("microsoft", EntityLabel::Org),
    ("amazon", EntityLabel::Org),
    ("amazon web services", EntityLabel::Org),
    ("apple", EntityLabel::Org),
    ("ibm", EntityLabel::Org),
    ("red hat", EntityLabel::Org),
    ("atlassian", EntityLabel::Org),
    ("hashicorp", EntityLabel::Org),
    ("databricks", EntityLabel::Org),
    ("snowflake", EntityLabel::Org),
    ("cloudflare", EntityLabel::Org),
    ("salesforce", EntityLabel::Org),
    ("apache software foundation", EntityLabel::Org),
    ("linux foundation", EntityLabel::Org),
    ("visual studio code", EntityLabel::Product),
    ("visual studio", EntityLabel::Product),
    ("intellij idea", EntityLabel::Product),
    ("android studio", EntityLabel::Product),
    ("power bi", EntityLabel::Product),
    ("tableau", EntityLabel::Product),
    ("jira", EntityLabel::Product),
    ("confluence", EntityLabel::Product),
    ("photoshop", EntityLabel::Product),
    ("figma", EntityLabel::Product),
    ("excel", EntityLabel::Product),
    ("new york", EntityLabel::Gpe),
    ("san francisco", EntityLabel::Gpe),
    ("london", EntityLabel::Gpe),
    ("berlin", EntityLabel::Gpe),
    ("singapore", EntityLabel::Gpe),
    ("tokyo", EntityLabel::Gpe),
    ("hanoi", EntityLabel::Gpe),
    ("ho chi minh city", EntityLabel::Gpe),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_stop: bool,
    pub is_punct: bool,
    pub like_email: bool,
    pub like_url: bool,
    pub sentence: usize,
}

impl Token {
    fn word(text: &str, is_stop: bool, is_punct: bool, sentence: usize) -> Self {
        Self {
            text: text.to_string(),
            is_stop,
            is_punct,
            like_email: false,
            like_url: false,
            sentence,
        }
    }

    fn is_number(&self) -> bool {
        self.text.chars().all(|c| c.is_numeric())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Org,
    Product,
    Skill,
    Gpe,
}

impl EntityLabel {
    /// Labels that can name a skill, a tool or an employer
    pub fn is_skill_like(&self) -> bool {
        matches!(self, EntityLabel::Org | EntityLabel::Product | EntityLabel::Skill)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Splits runs of content tokens into noun-phrase-like chunks
#[derive(Debug)]
pub struct NounChunker {
    breakers: HashSet<&'static str>,
}

impl NounChunker {
    pub fn new() -> Self {
        Self {
            breakers: PHRASE_BREAKERS.iter().copied().collect(),
        }
    }

    pub fn chunks(&self, tokens: &[Token]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut sentence = None;

        for token in tokens {
            if sentence != Some(token.sentence) && !current.is_empty() {
                chunks.push(current.join(" "));
                current.clear();
            }
            sentence = Some(token.sentence);

            let boundary = token.is_stop
                || token.is_punct
                || token.like_email
                || token.like_url
                || token.is_number()
                || self.breakers.contains(token.text.as_str());

            if boundary {
                if !current.is_empty() {
                    chunks.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(&token.text);
            }
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }
        chunks
    }
}

impl Default for NounChunker {
    fn default() -> Self {
        Self::new()
    }
}

/// Gazetteer-based recognizer over lowercase text
pub struct EntityRecognizer {
    matcher: AhoCorasick,
    labels: Vec<EntityLabel>,
}

impl EntityRecognizer {
    pub fn new(entries: Vec<(String, EntityLabel)>) -> Result<Self> {
        let (patterns, labels): (Vec<String>, Vec<EntityLabel>) = entries.into_iter().unzip();
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                ResumeMatcherError::Processing(format!("Failed to build entity recognizer: {}", e))
            })?;
        Ok(Self { matcher, labels })
    }

    /// Entities on word boundaries; `text` must already be lowercase
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        self.matcher
            .find_iter(text)
            .filter(|m| is_word_bounded(text, m.start(), m.end()))
            .map(|m| Entity {
                text: text[m.start()..m.end()].to_string(),
                label: self.labels[m.pattern().as_usize()],
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl std::fmt::Debug for EntityRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRecognizer")
            .field("patterns", &self.labels.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialKind {
    Email,
    Url,
    Version,
}

/// A byte range of text the tokenizer must not split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpecialSpan {
    start: usize,
    end: usize,
    kind: SpecialKind,
}

impl SpecialSpan {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && self.start < end
    }
}

fn special_token_regex() -> Result<Regex> {
    Regex::new(SPECIAL_TOKEN_PATTERN).map_err(|e| {
        ResumeMatcherError::Processing(format!("Invalid special token pattern: {}", e))
    })
}

pub(crate) fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
}

/// Shared linguistic analysis capability
#[derive(Debug)]
pub struct LanguageModel {
    stop_words: HashSet<&'static str>,
    special_tokens: Regex,
    chunker: Option<NounChunker>,
    recognizer: Option<EntityRecognizer>,
}

impl LanguageModel {
    /// Build the pipes listed in `config`. Vocabulary terms are registered
    /// with the recognizer as `Skill` entities.
    pub fn load(config: &AnalysisConfig, vocabulary: &Vocabulary) -> Result<Self> {
        let chunker = config.has_pipe(Pipe::Parser).then(NounChunker::new);

        let recognizer = if config.has_pipe(Pipe::Ner) {
            let mut entries: Vec<(String, EntityLabel)> = GAZETTEER
                .iter()
                .map(|(text, label)| (text.to_string(), *label))
                .collect();
            entries.extend(vocabulary.terms().map(|t| (t.to_string(), EntityLabel::Skill)));
            Some(EntityRecognizer::new(entries)?)
        } else {
            None
        };

        let model = Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            special_tokens: special_token_regex()?,
            chunker,
            recognizer,
        };
        debug!("Language model pipes: {:?}", model.pipe_names());
        Ok(model)
    }

    /// Tokenizer-only model
    pub fn blank() -> Result<Self> {
        Ok(Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            special_tokens: special_token_regex()?,
            chunker: None,
            recognizer: None,
        })
    }

    pub fn has_pipe(&self, pipe: Pipe) -> bool {
        match pipe {
            Pipe::Tokenizer => true,
            Pipe::Parser => self.chunker.is_some(),
            Pipe::Ner => self.recognizer.is_some(),
        }
    }

    pub fn pipe_names(&self) -> Vec<&'static str> {
        let mut names = vec!["tokenizer"];
        if self.chunker.is_some() {
            names.push("parser");
        }
        if self.recognizer.is_some() {
            names.push("ner");
        }
        names
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word.to_lowercase().as_str())
    }

    /// Unicode word-boundary tokenization. Emails, URLs and version
    /// strings such as `python-3.10` stay single tokens. `+` and `#`
    /// directly after a word are glued onto it so `c++` and `c#` survive.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();

        for (sentence, sentence_text) in text.unicode_sentences().enumerate() {
            let mut cursor = 0;
            for span in self.special_spans(sentence_text) {
                self.push_words(&sentence_text[cursor..span.start], sentence, &mut tokens);
                let mut token = Token::word(&sentence_text[span.start..span.end], false, false, sentence);
                token.like_email = span.kind == SpecialKind::Email;
                token.like_url = span.kind == SpecialKind::Url;
                tokens.push(token);
                cursor = span.end;
            }
            self.push_words(&sentence_text[cursor..], sentence, &mut tokens);
        }

        tokens
    }

    fn push_words(&self, text: &str, sentence: usize, tokens: &mut Vec<Token>) {
        let mut glued = false;
        for segment in text.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                glued = false;
                continue;
            }

            if glued && (segment == "+" || segment == "#") {
                if let Some(last) = tokens.last_mut() {
                    last.text.push_str(segment);
                    continue;
                }
            }

            let is_punct = !segment.chars().any(char::is_alphanumeric);
            glued = !is_punct;
            tokens.push(Token::word(segment, self.is_stop_word(segment), is_punct, sentence));
        }
    }

    /// Trailing punctuation is left out of URL and version spans
    fn special_spans(&self, text: &str) -> Vec<SpecialSpan> {
        self.special_tokens
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let kind = if caps.name("email").is_some() {
                    SpecialKind::Email
                } else if caps.name("url").is_some() {
                    SpecialKind::Url
                } else {
                    SpecialKind::Version
                };
                let matched = match kind {
                    SpecialKind::Email => whole.as_str(),
                    SpecialKind::Url | SpecialKind::Version => whole
                        .as_str()
                        .trim_end_matches(|c: char| !c.is_alphanumeric() && c != '/'),
                };
                Some(SpecialSpan {
                    start: whole.start(),
                    end: whole.start() + matched.len(),
                    kind,
                })
            })
            .collect()
    }

    /// Noun chunks, or nothing without a parser
    pub fn noun_chunks(&self, tokens: &[Token]) -> Vec<String> {
        self.chunker
            .as_ref()
            .map(|chunker| chunker.chunks(tokens))
            .unwrap_or_default()
    }

    /// Recognized entities, or nothing without a recognizer. Matches
    /// inside an email, URL or version string are dropped.
    pub fn entities(&self, text: &str) -> Vec<Entity> {
        let Some(recognizer) = self.recognizer.as_ref() else {
            return Vec::new();
        };
        let spans = self.special_spans(text);
        recognizer
            .recognize(text)
            .into_iter()
            .filter(|entity| !spans.iter().any(|span| span.overlaps(entity.start, entity.end)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_model() -> LanguageModel {
        let vocab = Vocabulary::from_terms(["python", "sql", "ruby on rails"]);
        LanguageModel::load(&AnalysisConfig::default(), &vocab).unwrap()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_marks_stop_words_and_punct() {
        let model = LanguageModel::blank().unwrap();
        let tokens = model.tokenize("i use python, daily.");

        assert_eq!(texts(&tokens), vec!["i", "use", "python", ",", "daily", "."]);
        assert!(tokens[0].is_stop);
        assert!(tokens[3].is_punct);
        assert!(!tokens[2].is_stop);
    }

    #[test]
    fn test_tokenize_glues_plus_and_hash() {
        let model = LanguageModel::blank().unwrap();
        let tokens = model.tokenize("c++ and c# with node.js");
        let words = texts(&tokens);

        assert!(words.contains(&"c++"));
        assert!(words.contains(&"c#"));
        assert!(words.contains(&"node.js"));
    }

    #[test]
    fn test_tokenize_keeps_emails_and_urls_whole() {
        let model = LanguageModel::blank().unwrap();
        let tokens = model.tokenize("contact: dev.python@gmail.com or see www.python.com/docs.");
        let words = texts(&tokens);

        assert_eq!(
            words,
            vec!["contact", ":", "dev.python@gmail.com", "or", "see", "www.python.com/docs", "."]
        );
        assert!(tokens[2].like_email);
        assert!(tokens[5].like_url);
        assert!(!tokens[0].like_email && !tokens[0].like_url);
    }

    #[test]
    fn test_tokenize_keeps_bare_domains_whole() {
        let model = LanguageModel::blank().unwrap();
        let tokens = model.tokenize("mail sql@python.org, docs at python.org");

        assert_eq!(texts(&tokens), vec!["mail", "sql@python.org", ",", "docs", "at", "python.org"]);
        assert!(tokens[1].like_email);
        assert!(tokens[5].like_url);
    }

    #[test]
    fn test_tokenize_keeps_version_strings_whole() {
        let model = LanguageModel::blank().unwrap();
        let tokens = model.tokenize("python-3.10, front-end and node.js");
        let words = texts(&tokens);

        assert_eq!(words[0], "python-3.10");
        assert_eq!(words[1], ",");
        assert!(!tokens[0].like_url);
        assert!(words.contains(&"front"));
        assert!(words.contains(&"node.js"));
    }

    #[test]
    fn test_tokenize_tracks_sentences() {
        let model = LanguageModel::blank().unwrap();
        let tokens = model.tokenize("we need rust\ndocker is a plus");
        let rust = tokens.iter().find(|t| t.text == "rust").unwrap();
        let docker = tokens.iter().find(|t| t.text == "docker").unwrap();
        assert_ne!(rust.sentence, docker.sentence);
    }

    #[test]
    fn test_noun_chunks_break_on_stop_words_and_verbs() {
        let model = full_model();
        let tokens = model.tokenize("need python and sql skills for 5 years");
        let chunks = model.noun_chunks(&tokens);

        assert_eq!(chunks, vec!["python", "sql skills", "years"]);
    }

    #[test]
    fn test_noun_chunks_keep_multiword_phrases() {
        let model = full_model();
        let tokens = model.tokenize("advanced python programming experience");
        assert_eq!(
            model.noun_chunks(&tokens),
            vec!["advanced python programming experience"]
        );
    }

    #[test]
    fn test_entities_include_vocabulary_skills() {
        let model = full_model();
        let entities = model.entities("built apps in ruby on rails at google in london");

        let found: Vec<(&str, EntityLabel)> =
            entities.iter().map(|e| (e.text.as_str(), e.label)).collect();
        assert!(found.contains(&("ruby on rails", EntityLabel::Skill)));
        assert!(found.contains(&("google", EntityLabel::Org)));
        assert!(found.contains(&("london", EntityLabel::Gpe)));
    }

    #[test]
    fn test_entities_respect_word_boundaries() {
        let model = full_model();
        assert!(model.entities("pythonic code").is_empty());
    }

    #[test]
    fn test_entities_skip_emails_urls_and_versions() {
        let model = full_model();
        assert!(model.entities("dev.python@gmail.com").is_empty());
        assert!(model.entities("www.python.com/docs").is_empty());
        assert!(model.entities("python-3.10").is_empty());

        let found = model.entities("python at sql@corp.io");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "python");
    }

    #[test]
    fn test_noun_chunks_break_on_emails() {
        let model = full_model();
        let tokens = model.tokenize("python developer jane@corp.org sql");
        assert_eq!(model.noun_chunks(&tokens), vec!["python developer", "sql"]);
    }

    #[test]
    fn test_blank_model_has_no_optional_pipes() {
        let model = LanguageModel::blank().unwrap();
        assert!(model.has_pipe(Pipe::Tokenizer));
        assert!(!model.has_pipe(Pipe::Parser));
        assert!(!model.has_pipe(Pipe::Ner));
        assert!(model.noun_chunks(&model.tokenize("python")).is_empty());
        assert!(model.entities("google").is_empty());
    }

    #[test]
    fn test_label_filter() {
        assert!(EntityLabel::Product.is_skill_like());
        assert!(!EntityLabel::Gpe.is_skill_like());
    }
}
