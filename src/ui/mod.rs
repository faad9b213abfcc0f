//! # 화면 조각(UI)
//!
//! 서버에서 그려 내보내는 작은 HTML 조각들입니다.
//! - `chip`: 선택된 태그를 보여주고 제거 버튼 역할을 하는 태그 칩

pub mod chip;

pub use chip::*;
