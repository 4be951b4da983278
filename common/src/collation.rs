//! ロケール風の文字列比較
//!
//! ブラウザの英語ロケールでの並びに合わせる。まず大文字小文字を無視して比較し、
//! 同じ場合のみ小文字を先にする。全順序なので並べ替え結果は一意。

use std::cmp::Ordering;

pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    primary
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
