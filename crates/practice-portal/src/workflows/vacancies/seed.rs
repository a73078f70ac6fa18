use chrono::NaiveDate;

use super::domain::{Vacancy, VacancyId, WorkMode};

fn posted(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("sample posting date is valid")
}

/// Openings shown on a fresh session, newest first.
pub fn sample_vacancies() -> Vec<Vacancy> {
    vec![
        Vacancy {
            id: VacancyId(1),
            title: "Pasantía en Desarrollo Web".to_string(),
            company: "Tech Solutions".to_string(),
            description: "Buscamos estudiantes para desarrollar aplicaciones web modernas."
                .to_string(),
            requirements: "Conocimientos de HTML, CSS, JavaScript. React es un plus.".to_string(),
            benefits: Some(
                "Flexibilidad horaria, experiencia práctica, posibilidad de contratación."
                    .to_string(),
            ),
            location: "Lima".to_string(),
            mode: WorkMode::Hybrid,
            duration: "3 meses".to_string(),
            posted_date: posted(2023, 10, 15),
            applications: Vec::new(),
        },
        Vacancy {
            id: VacancyId(2),
            title: "Práctica en Marketing Digital".to_string(),
            company: "Creative Agency".to_string(),
            description:
                "Oportunidad para aprender sobre estrategias de marketing digital y redes sociales."
                    .to_string(),
            requirements: "Estudiante de Marketing o carreras afines. Creatividad y proactividad."
                .to_string(),
            benefits: Some("Entrenamiento en herramientas de marketing, certificaciones.".to_string()),
            location: "Arequipa".to_string(),
            mode: WorkMode::Remote,
            duration: "4 meses".to_string(),
            posted_date: posted(2023, 10, 10),
            applications: Vec::new(),
        },
    ]
}
