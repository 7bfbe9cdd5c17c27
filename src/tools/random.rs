//! Randomised generators: nicknames, lotto numbers, dice, daily fortune.
//!
//! Generators take `&mut impl Rng` so tests can seed them; handlers pass
//! `rand::thread_rng()`. Nothing here is cryptographic.

use chrono::Local;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::params;
use crate::Request;

const CONSONANTS: [char; 14] = [
    'ㄱ', 'ㄴ', 'ㄷ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅅ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];
const VOWELS: [char; 10] = ['ㅏ', 'ㅑ', 'ㅓ', 'ㅕ', 'ㅗ', 'ㅛ', 'ㅜ', 'ㅠ', 'ㅡ', 'ㅣ'];

const FORTUNES: [&str; 5] = [
    "오늘은 투자에 좋은 날입니다! 신중하게 접근하세요.",
    "조금 더 신중한 투자가 필요한 날입니다.",
    "오늘은 관망하는 것이 좋겠습니다.",
    "새로운 투자 기회를 찾아보세요.",
    "기존 포트폴리오를 점검해보는 날입니다.",
];

pub const NICKNAMES_PER_REQUEST: usize = 5;
pub const MAX_NICKNAME_LENGTH: u32 = 64;
pub const MAX_LOTTO_SETS: u32 = 100;
pub const MAX_DICE: u32 = 1000;

const LOTTO_PICKS: usize = 6;
const LOTTO_MAX: u8 = 45;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NicknameParams {
    #[serde(deserialize_with = "params::count")]
    pub length: u32,
}

impl Default for NicknameParams {
    fn default() -> Self {
        Self { length: 6 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LottoParams {
    #[serde(deserialize_with = "params::count")]
    pub count: u32,
}

impl Default for LottoParams {
    fn default() -> Self {
        Self { count: 1 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiceParams {
    #[serde(deserialize_with = "params::count")]
    pub dice_count: u32,
    #[serde(deserialize_with = "params::count")]
    pub sides: u32,
}

impl Default for DiceParams {
    fn default() -> Self {
        Self { dice_count: 1, sides: 6 }
    }
}

#[derive(Debug, Serialize)]
pub struct DiceRoll {
    pub dice_results: Vec<u32>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct Fortune {
    pub fortune: &'static str,
    pub date: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

pub async fn generate_nickname(req: Request) -> Result<Vec<String>, ToolError> {
    let p: NicknameParams = req.json()?;
    if p.length > MAX_NICKNAME_LENGTH {
        return Err(ToolError::validation(format!(
            "length must be at most {MAX_NICKNAME_LENGTH}"
        )));
    }
    let mut rng = rand::thread_rng();
    Ok((0..NICKNAMES_PER_REQUEST).map(|_| nickname(&mut rng, p.length as usize)).collect())
}

pub async fn generate_lotto(req: Request) -> Result<Vec<Vec<u8>>, ToolError> {
    let p: LottoParams = req.json()?;
    if p.count > MAX_LOTTO_SETS {
        return Err(ToolError::validation(format!("count must be at most {MAX_LOTTO_SETS}")));
    }
    let mut rng = rand::thread_rng();
    Ok((0..p.count).map(|_| lotto_set(&mut rng)).collect())
}

pub async fn roll_dice(req: Request) -> Result<DiceRoll, ToolError> {
    let p: DiceParams = req.json()?;
    if p.sides == 0 {
        return Err(ToolError::validation("sides must be at least 1"));
    }
    if p.dice_count > MAX_DICE {
        return Err(ToolError::validation(format!("dice_count must be at most {MAX_DICE}")));
    }
    Ok(roll(&mut rand::thread_rng(), p.dice_count, p.sides))
}

pub async fn investment_fortune(_req: Request) -> Result<Fortune, ToolError> {
    Ok(Fortune {
        fortune: fortune(&mut rand::thread_rng()),
        date: Local::now().format("%Y-%m-%d").to_string(),
    })
}

// ── Generators ────────────────────────────────────────────────────────────────

/// `length` jamo, each a coin flip between a consonant and a vowel.
pub fn nickname(rng: &mut impl Rng, length: usize) -> String {
    (0..length)
        .map(|_| {
            let table: &[char] = if rng.gen_bool(0.5) { &CONSONANTS } else { &VOWELS };
            table[rng.gen_range(0..table.len())]
        })
        .collect()
}

/// Six distinct numbers from 1..=45, ascending.
pub fn lotto_set(rng: &mut impl Rng) -> Vec<u8> {
    let mut picks = (1..=LOTTO_MAX).choose_multiple(rng, LOTTO_PICKS);
    picks.sort_unstable();
    picks
}

pub fn roll(rng: &mut impl Rng, dice: u32, sides: u32) -> DiceRoll {
    let dice_results: Vec<u32> = (0..dice).map(|_| rng.gen_range(1..=sides)).collect();
    let total = dice_results.iter().map(|&d| u64::from(d)).sum();
    DiceRoll { dice_results, total }
}

pub fn fortune(rng: &mut impl Rng) -> &'static str {
    FORTUNES.choose(rng).copied().unwrap_or(FORTUNES[0])
}
