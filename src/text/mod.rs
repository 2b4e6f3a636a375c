// Text handling: word lists, normalization, tokenization and the positional
// term index, tied together by `Document`.

pub mod document;
pub mod index;
pub mod normalize;
pub mod tokenizer;
pub mod wordlist;
