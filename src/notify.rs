use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Error => "erro",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.label(), self.message)
    }
}

/// Destino das notificações exibidas ao usuário
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

// ========================================
// Terminal
// ========================================
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => eprintln!("{}", toast),
            _ => println!("{}", toast),
        }
    }
}

// ========================================
// Memória (testes e consumidores embutidos)
// ========================================
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.message).collect()
    }

    pub fn count(&self, kind: ToastKind) -> usize {
        self.toasts().iter().filter(|t| t.kind == kind).count()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().last().cloned()
    }

    pub fn clear(&self) {
        if let Ok(mut t) = self.toasts.lock() {
            t.clear();
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut t) = self.toasts.lock() {
            t.push(toast);
        }
    }
}
