//! Corpora management module
//!
//! Handles loading and querying the common-password and dictionary-word sets.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

static CORPORA: RwLock<Option<Corpora>> = RwLock::new(None);

/// Built-in fallback set of the most common leaked passwords. Deployments
/// are expected to supplement this with a full list file.
static BUILTIN_COMMON: &[&str] = &[
    "123456", "password", "12345678", "qwerty", "123456789", "12345", "1234",
    "111111", "1234567", "dragon", "123123", "baseball", "abc123", "football",
    "monkey", "letmein", "shadow", "master", "666666", "qwertyuiop", "123321",
    "mustang", "1234567890", "michael", "654321", "superman", "1qaz2wsx",
    "7777777", "121212", "000000", "qazwsx", "123qwe", "killer", "trustno1",
    "jordan", "jennifer", "zxcvbnm", "asdfgh", "hunter", "buster", "soccer",
    "harley", "batman", "andrew", "tigger", "sunshine", "iloveyou", "charlie",
    "robert", "thomas", "hockey", "ranger", "daniel", "starwars", "112233",
    "george", "computer", "michelle", "jessica", "pepper", "1111", "zxcvbn",
    "555555", "11111111", "131313", "freedom", "777777", "pass", "maggie",
    "159753", "aaaaaa", "ginger", "princess", "joshua", "cheese", "amanda",
    "summer", "love", "ashley", "nicole", "chelsea", "biteme", "matthew",
    "access", "yankees", "987654321", "dallas", "austin", "thunder", "taylor",
    "matrix", "william", "corvette", "hello", "martin", "heather", "secret",
    "merlin", "diamond", "1234qwer", "hammer", "silver", "222222", "88888888",
    "anthony", "justin", "test", "bailey", "q1w2e3r4t5", "patrick", "internet",
    "scooter", "orange", "11111", "golfer", "cookie", "richard", "samantha",
    "bigdog", "guitar", "jackson", "whatever", "mickey", "chicken", "sparky",
    "snoopy", "maverick", "phoenix", "camaro", "peanut", "morgan", "welcome",
    "falcon", "cowboy", "ferrari", "samsung", "andrea", "smokey", "steelers",
    "joseph", "mercedes", "dakota", "arsenal", "eagles", "melissa", "boomer",
    "spider", "nascar", "monster", "tigers", "yellow", "xxxxxx", "123123123",
    "gateway", "marina", "diablo", "bulldog", "qwer1234", "compaq", "purple",
    "banana", "junior", "hannah", "123654", "porsche", "lakers", "iceman",
    "money", "cowboys", "987654", "london", "tennis", "999999", "ncc1701",
    "coffee", "scooby", "0000", "miller", "boston", "q1w2e3r4", "brandon",
    "yamaha", "chester", "mother", "forever", "johnny", "edward", "333333",
    "oliver", "redsox", "player", "nikita", "knight", "fender", "barney",
    "midnight", "please", "brandy", "chicago", "badboy", "slayer", "rangers",
    "charles", "angel", "flower", "bigdaddy", "rabbit", "wizard", "jasper",
    "enter", "rachel", "chris", "steven", "winner", "adidas", "victoria",
    "natasha", "1q2w3e4r", "jasmine", "winter", "prince", "marine", "fishing",
    "cocacola", "casper", "james", "232323", "raiders", "888888", "marlboro",
    "gandalf", "asdfasdf", "crystal", "87654321", "12344321", "golden",
    "8675309", "panther", "lauren", "angela", "spanky", "thx1138", "angels",
    "madison", "winston", "shannon", "mike", "toyota", "jordan23", "canada",
    "sophie", "apples", "tiger", "123abc", "pokemon", "qazxsw", "55555",
    "qwaszx", "muffin", "johnson", "murphy", "cooper", "jonathan", "david",
    "danielle", "159357", "jackie", "1990", "123456a", "789456", "turtle",
    "abcd1234", "scorpion", "qazwsxedc", "101010", "butter", "carlos",
    "password1", "dennis", "slipknot", "qwerty123", "booger", "asdf", "1991",
    "black", "startrek", "12341234", "cameron", "newyork", "rainbow", "nathan",
    "john", "1992", "rocket", "viking", "redskins", "asdfghj", "1212",
    "sierra", "peaches", "gemini", "doctor", "wilson", "sandra", "helpme",
    "qwertyui", "victor", "florida", "dolphin", "pookie", "captain", "tucker",
    "blue", "liverpool", "theman", "bandit", "dolphins", "maddog", "packers",
    "jaguar", "lovers", "nicholas", "united", "tiffany", "maxwell", "zzzzzz",
    "nirvana", "jeremy", "stupid", "monica", "elephant", "giants", "hotdog",
    "rosebud", "success", "debbie", "mountain", "444444", "xxxxxxxx",
    "warrior", "1q2w3e4r5t", "q1w2e3", "123456q", "albert", "metallic",
    "lucky", "azerty", "7777", "alex", "bond007", "alexis", "1111111",
    "samson", "5150", "willie", "scorpio", "bonnie", "gators", "benjamin",
    "voodoo", "driver", "dexter", "2112", "jason", "calvin", "freddy",
    "212121", "creative", "12345a", "sydney", "rush2112", "1989", "asdfghjkl",
    "red123", "bubba", "4815162342", "passw0rd", "trouble", "gunner", "happy",
    "gordon", "legend", "jessie", "stella", "qwert", "eminem", "arthur",
    "apple", "nissan", "bear", "america", "1qazxsw2", "nothing", "parker",
    "4444", "rebecca", "qweqwe", "garfield", "01012011", "beavis", "jack",
    "asdasd", "december", "2222", "102030", "252525", "11223344", "magic",
    "apollo", "skippy", "315475", "girls", "kitten", "golf", "copper",
    "braves", "shelby", "godzilla", "beaver", "fred", "tomcat", "august",
    "buddy", "airborne", "1993", "1988", "lifehack", "qqqqqq", "brooklyn",
    "animal", "platinum", "phantom", "online", "xavier", "darkness",
    "blink182", "power", "fish", "green", "789456123", "voyager", "police",
    "travis", "12qwaszx", "heaven", "snowball", "lover", "abcdef", "00000",
    "007007", "walter", "playboy", "blazer", "cricket", "sniper", "donkey",
    "willow", "loveme", "saturn", "therock", "redwings", "bigboy", "pumpkin",
    "trinity", "williams", "nintendo", "digital", "destiny", "topgun",
    "runner", "marvin", "guinness", "chance", "bubbles", "testing", "fire",
    "november", "minecraft", "asdf1234", "lasvegas", "sergey", "broncos",
    "cartman", "private", "celtic", "birdie", "little", "cassie", "babygirl",
    "donald", "beatles", "1313", "family", "12345q", "zxc123", "chemistry",
    "spring", "bruce", "eclipse", "bottom", "billybob", "7654321", "1994",
    "1987", "0987654321", "98765432", "9876543210", "asd123", "picard",
    "2010", "gosox", "love123", "princess1", "admin", "god", "root",
    "pass123", "temp", "guest", "demo", "test123", "user", "welcome1",
    "backup", "system", "super", "service", "support", "sales", "mysql",
    "oracle", "postgres", "database", "server", "apache", "web", "www",
    "mail", "email", "ftp", "ssh", "telnet", "router", "switch", "firewall",
    "vpn", "security", "monitor",
];

/// Built-in fallback dictionary of common English words, including the
/// short fragments that layered passwords are built from.
static BUILTIN_DICTIONARY: &[&str] = &[
    "pass", "word", "password", "computer", "internet", "security", "welcome",
    "admin", "user", "login", "system", "server", "network", "database",
    "website", "email", "account", "profile", "settings", "config", "backup",
    "recovery", "download", "upload", "file", "folder", "document", "picture",
    "image", "video", "music", "game", "player", "winner", "loser", "master",
    "expert", "professional", "business", "company", "office", "home",
    "house", "family", "friend", "love", "heart", "soul", "mind", "body",
    "health", "money", "cash", "bank", "credit", "card", "payment", "price",
    "value", "cost", "budget", "finance", "investment", "profit", "market",
    "trade", "sale", "customer", "client", "service", "support", "help",
    "guide", "tutorial", "lesson", "course", "school", "student", "teacher",
    "education", "learning", "knowledge", "skill", "ability", "talent",
    "gift", "power", "strength", "energy", "force", "speed", "time", "space",
    "world", "earth", "planet", "universe", "galaxy", "star", "moon", "sun",
    "light", "dark", "bright", "color", "blue", "red", "green", "yellow",
    "orange", "purple", "pink", "black", "white", "gray", "brown", "silver",
    "gold", "diamond", "metal", "rock", "stone", "mountain", "valley",
    "river", "ocean", "sea", "lake", "beach", "island", "forest", "tree",
    "flower", "grass", "animal", "bird", "fish", "cat", "dog", "horse",
    "cow", "pig", "sheep", "chicken", "tiger", "lion", "elephant", "monkey",
    "bear", "wolf", "fox", "rabbit", "mouse", "snake", "january", "february",
    "march", "april", "june", "july", "august", "september", "october",
    "november", "december", "monday", "tuesday", "wednesday", "thursday",
    "friday", "saturday", "sunday", "spring", "summer", "autumn", "winter",
    "year", "month", "week",
];

/// Loaded corpora. Written once at initialization, read-only afterwards.
#[derive(Debug)]
struct Corpora {
    common: HashSet<String>,
    // Ordered so that multi-word detection is deterministic.
    dictionary: BTreeSet<String>,
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("word list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read word list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("word list file is empty: {0}")]
    EmptyFile(PathBuf),
}

/// Returns the common-password list path, if one is configured.
///
/// Priority:
/// 1. Environment variable `PWD_COMMON_PASSWORDS_PATH`
/// 2. Default path `./assets/common_passwords.txt`, when it exists
fn common_passwords_path() -> Option<PathBuf> {
    resolve_path("PWD_COMMON_PASSWORDS_PATH", "./assets/common_passwords.txt")
}

/// Returns the dictionary word-list path, if one is configured.
///
/// Priority:
/// 1. Environment variable `PWD_DICTIONARY_WORDS_PATH`
/// 2. Default path `./assets/dictionary_words.txt`, when it exists
fn dictionary_words_path() -> Option<PathBuf> {
    resolve_path("PWD_DICTIONARY_WORDS_PATH", "./assets/dictionary_words.txt")
}

fn resolve_path(env_key: &str, default: &str) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(env_key) {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from(default);
    default.exists().then_some(default)
}

/// Initializes the corpora, merging the built-in sets with any configured
/// word-list files (call once at startup).
///
/// An explicitly configured file must exist, be readable and be non-empty;
/// without configured files the built-in sets are used alone. Entries are
/// merged case-insensitively. Idempotent: later calls return the loaded
/// sizes without reloading.
///
/// # Returns
/// `(common_count, dictionary_count)` on success.
pub fn init_corpora() -> Result<(usize, usize), CorpusError> {
    init_corpora_from_paths(
        common_passwords_path().as_deref(),
        dictionary_words_path().as_deref(),
    )
}

/// Initializes the corpora from explicit file paths.
///
/// Use this when paths come from an asset system or configuration layer
/// instead of environment variables. `None` skips the file for that corpus
/// and keeps its built-in set.
pub fn init_corpora_from_paths(
    common: Option<&Path>,
    dictionary: Option<&Path>,
) -> Result<(usize, usize), CorpusError> {
    {
        let guard = CORPORA.read().unwrap();
        if let Some(corpora) = guard.as_ref() {
            return Ok((corpora.common.len(), corpora.dictionary.len()));
        }
    }

    let mut common_set: HashSet<String> =
        BUILTIN_COMMON.iter().map(|w| w.to_string()).collect();
    if let Some(path) = common {
        common_set.extend(load_word_list(path)?);
    }

    let mut dictionary_set: BTreeSet<String> =
        BUILTIN_DICTIONARY.iter().map(|w| w.to_string()).collect();
    if let Some(path) = dictionary {
        dictionary_set.extend(load_word_list(path)?);
    }

    let counts = (common_set.len(), dictionary_set.len());
    {
        let mut guard = CORPORA.write().unwrap();
        *guard = Some(Corpora {
            common: common_set,
            dictionary: dictionary_set,
        });
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        "Corpora initialized: {} common passwords, {} dictionary words",
        counts.0,
        counts.1
    );

    Ok(counts)
}

fn load_word_list(path: &Path) -> Result<HashSet<String>, CorpusError> {
    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Corpus initialization FAILED: FileNotFound {:?}", path);
        return Err(CorpusError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Corpus initialization FAILED: Empty file {:?}", path);
        return Err(CorpusError::EmptyFile(path.to_path_buf()));
    }

    Ok(content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect())
}

/// Loads the built-in sets when no explicit initialization happened.
fn ensure_loaded() {
    {
        let guard = CORPORA.read().unwrap();
        if guard.is_some() {
            return;
        }
    }
    let mut guard = CORPORA.write().unwrap();
    if guard.is_none() {
        *guard = Some(Corpora {
            common: BUILTIN_COMMON.iter().map(|w| w.to_string()).collect(),
            dictionary: BUILTIN_DICTIONARY.iter().map(|w| w.to_string()).collect(),
        });
    }
}

/// Checks exact membership in the common-password set.
///
/// Expects the already lower-cased password.
pub(crate) fn is_common_password(lower: &str) -> bool {
    ensure_loaded();
    let guard = CORPORA.read().unwrap();
    guard
        .as_ref()
        .map(|c| c.common.contains(lower))
        .unwrap_or(false)
}

/// Returns every dictionary word longer than 3 characters contained in the
/// lower-cased password, in lexicographic order.
pub(crate) fn dictionary_hits(lower: &str) -> Vec<String> {
    ensure_loaded();
    let guard = CORPORA.read().unwrap();
    guard
        .as_ref()
        .map(|c| {
            c.dictionary
                .iter()
                .filter(|w| w.chars().count() > 3 && lower.contains(w.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Resets the corpora for testing purposes.
#[cfg(test)]
pub fn reset_corpora_for_testing() {
    let mut guard = CORPORA.write().unwrap();
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn word_list_file(words: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for word in words {
            writeln!(temp_file, "{}", word).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    #[serial]
    fn test_builtin_common_membership() {
        reset_corpora_for_testing();
        assert!(is_common_password("password"));
        assert!(is_common_password("qwerty"));
        assert!(!is_common_password("kH8#mQz!vR2p"));
    }

    #[test]
    #[serial]
    fn test_builtin_dictionary_hits_are_sorted() {
        reset_corpora_for_testing();
        let hits = dictionary_hits("password");
        assert_eq!(
            hits,
            vec!["pass".to_string(), "password".to_string(), "word".to_string()]
        );
    }

    #[test]
    #[serial]
    fn test_short_dictionary_words_ignored() {
        reset_corpora_for_testing();
        // "sun" is in the dictionary but not longer than 3 characters.
        assert!(dictionary_hits("sunlit").iter().all(|w| w != "sun"));
    }

    #[test]
    #[serial]
    fn test_init_merges_file_with_builtin() {
        reset_corpora_for_testing();
        let common = word_list_file(&["Hunter2", "tr0ub4dor"]);
        let (common_count, _) = init_corpora_from_paths(Some(common.path()), None)
            .expect("init should succeed");

        assert!(common_count > BUILTIN_COMMON.len());
        assert!(is_common_password("hunter2")); // merged case-insensitively
        assert!(is_common_password("password")); // built-ins survive the merge
    }

    #[test]
    #[serial]
    fn test_init_is_idempotent() {
        reset_corpora_for_testing();
        let common = word_list_file(&["zzzonlyfirstload"]);
        let first = init_corpora_from_paths(Some(common.path()), None).unwrap();
        // Second call with no files must not reload or change counts.
        let second = init_corpora_from_paths(None, None).unwrap();
        assert_eq!(first, second);
        assert!(is_common_password("zzzonlyfirstload"));
    }

    #[test]
    #[serial]
    fn test_init_missing_file() {
        reset_corpora_for_testing();
        let result =
            init_corpora_from_paths(Some(Path::new("/nonexistent/common.txt")), None);
        assert!(matches!(result, Err(CorpusError::FileNotFound(_))));
    }

    #[test]
    #[serial]
    fn test_init_empty_file() {
        reset_corpora_for_testing();
        let empty = NamedTempFile::new().expect("Failed to create temp file");
        let result = init_corpora_from_paths(None, Some(empty.path()));
        assert!(matches!(result, Err(CorpusError::EmptyFile(_))));
    }

    #[test]
    #[serial]
    fn test_init_from_env() {
        reset_corpora_for_testing();
        let dict = word_list_file(&["xylophone"]);
        // SAFETY: test-only env mutation, serialized by #[serial]
        unsafe {
            std::env::set_var("PWD_DICTIONARY_WORDS_PATH", dict.path());
        }

        let result = init_corpora();
        assert!(result.is_ok());
        assert_eq!(dictionary_hits("myxylophone123"), vec!["xylophone".to_string()]);

        unsafe {
            std::env::remove_var("PWD_DICTIONARY_WORDS_PATH");
        }
    }
}
