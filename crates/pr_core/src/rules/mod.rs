//! Rules Module
//!
//! 값 추출 규칙 모델: 포매터 타입, 규칙, 규칙 세트

pub mod rule;
pub mod set;
pub mod types;


pub use rule::{Extracted, Rule, RuleKind};
pub use set::RuleSet;
pub use types::{
    FormattedValue, MultiValue, MultiValueFormatter, SingleValue, SparseMultiValue,
    SparseMultiValueFormatter, ValueFormatter,
};
