use maud::{html, Markup, PreEscaped, DOCTYPE};
use mentoria::workflows::mentorship::{
    ApplicationForm, BusinessStatus, DraftField, InterestLevel, Notification, WorkType,
    MASKED_PHONE_LEN, SUBMIT_LABEL,
};

const TITLE: &str = "Mentoria RW MasterClass";
const PITCH: &str = "O futuro é de quem domina a IA! Empresas buscam gestores de fluxo para \
automatizar processos e liderar com inteligência. Participe da mentoria gratuita e descubra \
como conquistar oportunidades e se destacar no mercado. Garanta sua vaga!";

const CITY_SCRIPT: &str = r#"
const city = document.getElementById("city");
const list = document.getElementById("city-suggestions");
let ticket = 0;
city.addEventListener("input", async () => {
  const current = ++ticket;
  const response = await fetch("/api/v1/mentorship/cities?q=" + encodeURIComponent(city.value));
  if (!response.ok || current !== ticket) return;
  const body = await response.json();
  list.replaceChildren(...body.suggestions.map((name) => new Option(name)));
});
"#;

/// What the landing page shows besides the form values.
#[derive(Debug, Default)]
pub(crate) struct LandingView<'a> {
    pub(crate) notification: Option<&'a Notification>,
    pub(crate) missing: &'a [DraftField],
}

pub(crate) fn landing_page(form: &ApplicationForm, view: LandingView<'_>) -> Markup {
    let work_types: Vec<(&str, &str)> = WorkType::ALL
        .iter()
        .map(|option| (option.as_str(), option.label()))
        .collect();
    let business_statuses: Vec<(&str, &str)> = BusinessStatus::ALL
        .iter()
        .map(|option| (option.as_str(), option.label()))
        .collect();

    let body = html! {
        header {
            h1 { (TITLE) }
            p { (PITCH) }
            a href="#formulario-inscricao" { "Preencher Formulário" }
        }
        @if let Some(notification) = view.notification {
            div.toast.destructive[notification.is_error()] role="alert" {
                strong { (notification.title) }
                p { (notification.description) }
            }
        }
        @if !view.missing.is_empty() {
            ul.missing {
                @for field in view.missing {
                    li { (field.label()) }
                }
            }
        }
        form #formulario-inscricao method="post" action="/inscricao" {
            h2 { "Formulário de Inscrição" }
            fieldset {
                legend { "Dados Pessoais" }
                (text_input("name", DraftField::Name, &form.name, "Seu nome completo"))
                label for="whatsapp" { (DraftField::Phone.label()) }
                input #whatsapp name="whatsapp" type="tel" maxlength=(MASKED_PHONE_LEN)
                    placeholder="(00) 00000-0000" value=(form.whatsapp);
                label for="city" { (DraftField::City.label()) }
                input #city name="city" list="city-suggestions" autocomplete="off"
                    placeholder="Sua cidade" value=(form.city);
                datalist #city-suggestions {}
                (text_input(
                    "current_job",
                    DraftField::CurrentJob,
                    &form.current_job,
                    "Descreva sua ocupação atual",
                ))
            }
            fieldset {
                legend { "Perfil Profissional" }
                (radio_group("work_type", DraftField::WorkType, &form.work_type, &work_types))
                (radio_group(
                    "business_owner",
                    DraftField::BusinessStatus,
                    &form.business_owner,
                    &business_statuses,
                ))
            }
            fieldset {
                legend { "Interesse e Motivação" }
                label for="interest" { (DraftField::Interest.label()) }
                select #interest name="interest" {
                    option value="" { "Selecione seu nível de interesse" }
                    @for option in InterestLevel::ALL {
                        option value=(option.as_str()) selected[form.interest == option.as_str()] {
                            (option.label())
                        }
                    }
                }
                label for="motivation" { (DraftField::Motivation.label()) }
                textarea #motivation name="motivation"
                    placeholder="Descreva suas motivações, objetivos e expectativas..." {
                    (form.motivation)
                }
            }
            fieldset {
                legend { "Compromissos da Mentoria" }
                (checkbox("accept_frequency", DraftField::AcceptFrequency, form.accept_frequency))
                (checkbox(
                    "accept_time_commitment",
                    DraftField::AcceptTimeCommitment,
                    form.accept_time_commitment,
                ))
                (checkbox(
                    "accept_group_participation",
                    DraftField::AcceptGroupParticipation,
                    form.accept_group_participation,
                ))
            }
            button type="submit" { (SUBMIT_LABEL) }
        }
        script { (PreEscaped(CITY_SCRIPT)) }
    };

    document(TITLE, body)
}

pub(crate) fn confirmation_page() -> Markup {
    let body = html! {
        main.confirmation {
            h1 { "Parabéns pela inscrição!" }
            p {
                "Recebemos sua inscrição com sucesso."
                br;
                "Em breve você receberá mais informações no seu WhatsApp."
            }
            p { "Prepare-se para transformar sua carreira com IA!" }
        }
    };
    document("Parabéns pela inscrição!", body)
}

fn document(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body { (body) }
        }
    }
}

fn text_input(name: &str, field: DraftField, value: &str, placeholder: &str) -> Markup {
    html! {
        label for=(name) { (field.label()) }
        input id=(name) name=(name) placeholder=(placeholder) value=(value);
    }
}

fn radio_group(name: &str, field: DraftField, current: &str, options: &[(&str, &str)]) -> Markup {
    html! {
        div role="radiogroup" {
            span { (field.label()) }
            @for (value, label) in options {
                label {
                    input type="radio" name=(name) value=(value) checked[current == *value];
                    " " (label)
                }
            }
        }
    }
}

fn checkbox(name: &str, field: DraftField, checked: bool) -> Markup {
    html! {
        label {
            input type="checkbox" name=(name) checked[checked];
            " " (field.label())
        }
    }
}
