use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Route rendered after a successful submission.
pub const CONFIRMATION_ROUTE: &str = "/parabens";

/// Visual treatment requested from the notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Transient message shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn validation_failed() -> Self {
        Self {
            title: "Campos obrigatórios".to_string(),
            description:
                "Por favor, preencha todos os campos obrigatórios e confirme os compromissos."
                    .to_string(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn submission_failed() -> Self {
        Self {
            title: "Erro".to_string(),
            description: "Falha ao enviar a inscrição. Tente novamente mais tarde.".to_string(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn submission_succeeded() -> Self {
        Self {
            title: "Inscrição enviada!".to_string(),
            description: "Sua candidatura para a mentoria foi enviada com sucesso. Entraremos em contato em breve!".to_string(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Toast surface. Display duration and dismissal are up to the implementor.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Client-side router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Collects the notifications and navigations of a single request so they
/// can be returned to an HTTP client.
#[derive(Debug, Default)]
pub struct FeedbackRecorder {
    notifications: Mutex<Vec<Notification>>,
    routes: Mutex<Vec<String>>,
}

impl FeedbackRecorder {
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    pub fn routes(&self) -> Vec<String> {
        lock(&self.routes).clone()
    }

    /// Most recent notification, which is the one the applicant sees.
    pub fn last_notification(&self) -> Option<Notification> {
        lock(&self.notifications).last().cloned()
    }

    pub fn redirect(&self) -> Option<String> {
        lock(&self.routes).last().cloned()
    }
}

impl Notifier for FeedbackRecorder {
    fn notify(&self, notification: Notification) {
        lock(&self.notifications).push(notification);
    }
}

impl Navigator for FeedbackRecorder {
    fn navigate(&self, route: &str) {
        lock(&self.routes).push(route.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
