//! 사용자 알림(toast)
//!
//! 변경 훅은 성공/실패를 `Notifier`로 알립니다. 서버에서는
//! `TracingNotifier`가 로그로 남기고, 화면을 가진 임베더나 테스트는
//! `ToastLog`로 모아서 꺼내 봅니다.

use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// 잠깐 떴다 사라지는 알림 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// 알림을 로그로만 남기는 기본 구현
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => tracing::info!(message = %toast.message, "toast"),
            ToastKind::Error => tracing::warn!(message = %toast.message, "toast"),
        }
    }
}

/// 받은 알림을 순서대로 모아두는 구현
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 받은 알림 사본
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    /// 모아둔 알림을 꺼내고 비웁니다.
    pub fn take(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut toasts| std::mem::take(&mut *toasts))
            .unwrap_or_default()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}
