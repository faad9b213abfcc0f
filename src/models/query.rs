//! # 정렬/페이지 기술자(descriptor)
//!
//! 목록 조회에 넘기는 정렬 기준(`SortBy`)과 페이지 정보(`Pagination`)입니다.
//! 둘 다 생성 후 바뀌지 않는 값 타입이며, 목록 함수에 그대로 전달됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 정렬 방향
///
/// `"dec"`는 관리자 화면이 예전부터 보내던 값이라 `Desc`의 별칭으로 받습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    #[serde(alias = "dec")]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// 정렬 기준: 컬럼 이름 + 방향
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// 허용된 컬럼이면 `ORDER BY` 절을 만들고, 아니면 백엔드처럼 에러 문자열을 돌려줍니다.
    ///
    /// 컬럼 이름은 바인딩할 수 없으므로 화이트리스트로만 SQL에 들어갑니다.
    pub fn order_clause(&self, allowed: &[&str]) -> Result<String, String> {
        if !allowed.contains(&self.field.as_str()) {
            return Err(format!("column \"{}\" does not exist", self.field));
        }
        Ok(format!(" ORDER BY {} {}", self.field, self.direction.as_sql()))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field, self.direction.as_sql().to_lowercase())
    }
}

/// 페이지 기술자: 1부터 시작하는 페이지 번호 + 페이지 크기
///
/// 둘 중 하나라도 없거나 0이면 범위 없이 전체를 조회합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// 0부터 시작하는 포함(inclusive) 범위 `(from, to)`를 계산합니다.
    pub fn range(&self) -> Option<(u64, u64)> {
        match (self.page, self.per_page) {
            (Some(page), Some(size)) if page >= 1 && size >= 1 => {
                Some(page_range(page, size))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range() {
            Some((from, to)) => write!(f, "{}..={}", from, to),
            None => write!(f, "all"),
        }
    }
}

/// `page`(≥1), `size`(≥1) → `[(page-1)*size, (page-1)*size + size - 1]`
pub fn page_range(page: u32, size: u32) -> (u64, u64) {
    let from = (page as u64 - 1) * size as u64;
    let to = from + size as u64 - 1;
    (from, to)
}

/// 포함 범위 `(from, to)`를 SQL `LIMIT`/`OFFSET` 값으로 바꿉니다.
///
/// 시작 위치가 `i64`에 들어가지 않으면 None입니다. 그만큼 행이 있을 수 없으므로
/// 호출자는 빈 페이지로 처리합니다.
pub fn limit_offset((from, to): (u64, u64)) -> Option<(i64, i64)> {
    let offset = i64::try_from(from).ok()?;
    let limit = i64::try_from(to - from + 1).ok()?;
    Some((limit, offset))
}
