use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::phone::mask_phone;

/// How strongly the applicant wants to join the mentorship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestLevel {
    MuitoAlto,
    Alto,
    Medio,
    Baixo,
}

impl InterestLevel {
    pub const ALL: [InterestLevel; 4] = [Self::MuitoAlto, Self::Alto, Self::Medio, Self::Baixo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MuitoAlto => "muito_alto",
            Self::Alto => "alto",
            Self::Medio => "medio",
            Self::Baixo => "baixo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MuitoAlto => "Muito Alto - Extremamente interessado",
            Self::Alto => "Alto - Muito interessado",
            Self::Medio => "Médio - Interessado",
            Self::Baixo => "Baixo - Pouco interessado",
        }
    }
}

/// How the applicant intends to apply what they learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    Freelancer,
    Agencia,
    AprenderSemFinsLucrativos,
    DesenvolverParaEmpresa,
}

impl WorkType {
    pub const ALL: [WorkType; 4] = [
        Self::Freelancer,
        Self::Agencia,
        Self::AprenderSemFinsLucrativos,
        Self::DesenvolverParaEmpresa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freelancer => "freelancer",
            Self::Agencia => "agencia",
            Self::AprenderSemFinsLucrativos => "aprender_sem_fins_lucrativos",
            Self::DesenvolverParaEmpresa => "desenvolver_para_empresa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Freelancer => "Freelancer",
            Self::Agencia => "Abrir agência",
            Self::AprenderSemFinsLucrativos => "Só quero aprender sem fins lucrativos",
            Self::DesenvolverParaEmpresa => "Quero desenvolver pra minha empresa",
        }
    }
}

/// Whether the applicant already runs a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStatus {
    DonoEmpresa,
    AprenderProfissao,
}

impl BusinessStatus {
    pub const ALL: [BusinessStatus; 2] = [Self::DonoEmpresa, Self::AprenderProfissao];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DonoEmpresa => "dono_empresa",
            Self::AprenderProfissao => "aprender_profissao",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DonoEmpresa => "Já sou dono de empresa",
            Self::AprenderProfissao => "Quero aprender a profissão para renda principal",
        }
    }
}

/// Raised when a wire value does not name any option of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown option '{value}' for {field}")]
pub struct UnknownOption {
    pub field: DraftField,
    pub value: String,
}

macro_rules! option_from_str {
    ($ty:ty, $field:expr) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                Self::ALL
                    .into_iter()
                    .find(|option| option.as_str() == trimmed)
                    .ok_or_else(|| UnknownOption {
                        field: $field,
                        value: value.to_string(),
                    })
            }
        }
    };
}

option_from_str!(InterestLevel, DraftField::Interest);
option_from_str!(WorkType, DraftField::WorkType);
option_from_str!(BusinessStatus, DraftField::BusinessStatus);

/// Draft fields in the order the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Phone,
    Interest,
    CurrentJob,
    WorkType,
    BusinessStatus,
    City,
    Motivation,
    AcceptFrequency,
    AcceptTimeCommitment,
    AcceptGroupParticipation,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Nome Completo",
            Self::Phone => "WhatsApp",
            Self::Interest => "Nível de interesse em participar da mentoria",
            Self::CurrentJob => "Trabalho Atual",
            Self::WorkType => "Como pretende trabalhar?",
            Self::BusinessStatus => "Situação empresarial",
            Self::City => "Cidade onde mora",
            Self::Motivation => "Por que gostaria de participar desta mentoria durante 3 meses?",
            Self::AcceptFrequency => {
                "Aceito participar da mentoria 2 vezes por semana durante 3 meses"
            }
            Self::AcceptTimeCommitment => {
                "Aceito disponibilizar 1 hora do meu tempo para cada encontro"
            }
            Self::AcceptGroupParticipation => {
                "Aceito participar do grupo de no máximo 6 a 10 mentorados"
            }
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// In-memory record of what the applicant has typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub name: String,
    pub phone: String,
    pub interest: Option<InterestLevel>,
    pub current_job: String,
    pub work_type: Option<WorkType>,
    pub business_status: Option<BusinessStatus>,
    pub city: String,
    pub motivation: String,
    pub accept_frequency: bool,
    pub accept_time_commitment: bool,
    pub accept_group_participation: bool,
}

impl ApplicationDraft {
    /// Store the phone number exactly as the masked input would display it.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = mask_phone(raw);
    }

    /// Fields that keep the draft from being submitted, in form order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let checks = [
            (DraftField::Name, is_blank(&self.name)),
            (DraftField::Phone, is_blank(&self.phone)),
            (DraftField::Interest, self.interest.is_none()),
            (DraftField::CurrentJob, is_blank(&self.current_job)),
            (DraftField::WorkType, self.work_type.is_none()),
            (DraftField::BusinessStatus, self.business_status.is_none()),
            (DraftField::City, is_blank(&self.city)),
            (DraftField::Motivation, is_blank(&self.motivation)),
            (DraftField::AcceptFrequency, !self.accept_frequency),
            (DraftField::AcceptTimeCommitment, !self.accept_time_commitment),
            (
                DraftField::AcceptGroupParticipation,
                !self.accept_group_participation,
            ),
        ];

        checks
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn validate(&self) -> Result<(), Vec<DraftField>> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Raw field values as a browser posts them, before any typing is applied.
///
/// Selections arrive as their wire value (or empty when untouched) and
/// checkboxes as booleans; missing keys default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub name: String,
    pub whatsapp: String,
    pub interest: String,
    pub current_job: String,
    pub work_type: String,
    pub business_owner: String,
    pub city: String,
    pub motivation: String,
    pub accept_frequency: bool,
    pub accept_time_commitment: bool,
    pub accept_group_participation: bool,
}

impl ApplicationForm {
    /// Apply the form values to a draft the way the field handlers would.
    ///
    /// Blank selections leave the field unselected. Unknown option values are
    /// rejected.
    pub fn into_draft(self) -> Result<ApplicationDraft, UnknownOption> {
        let mut draft = ApplicationDraft {
            name: self.name,
            interest: parse_option(&self.interest)?,
            current_job: self.current_job,
            work_type: parse_option(&self.work_type)?,
            business_status: parse_option(&self.business_owner)?,
            city: self.city,
            motivation: self.motivation,
            accept_frequency: self.accept_frequency,
            accept_time_commitment: self.accept_time_commitment,
            accept_group_participation: self.accept_group_participation,
            ..ApplicationDraft::default()
        };
        draft.set_phone(&self.whatsapp);
        Ok(draft)
    }
}

impl From<&ApplicationDraft> for ApplicationForm {
    fn from(draft: &ApplicationDraft) -> Self {
        Self {
            name: draft.name.clone(),
            whatsapp: draft.phone.clone(),
            interest: draft
                .interest
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            current_job: draft.current_job.clone(),
            work_type: draft
                .work_type
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            business_owner: draft
                .business_status
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            city: draft.city.clone(),
            motivation: draft.motivation.clone(),
            accept_frequency: draft.accept_frequency,
            accept_time_commitment: draft.accept_time_commitment,
            accept_group_participation: draft.accept_group_participation,
        }
    }
}

fn parse_option<T>(raw: &str) -> Result<Option<T>, UnknownOption>
where
    T: FromStr<Err = UnknownOption>,
{
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}
