use chrono::NaiveDate;

use super::domain::{Report, ReportId, ReportStatus};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("sample report date is valid")
}

/// Reports shown on a fresh session: one already approved, one awaiting review.
pub fn sample_reports() -> Vec<Report> {
    vec![
        Report {
            id: ReportId(1),
            title: "Informe de práctica - Primera semana".to_string(),
            content: "Durante mi primera semana en la empresa, me familiaricé con los procesos \
                      internos y herramientas utilizadas por el equipo de desarrollo."
                .to_string(),
            student_name: "Juan Pérez".to_string(),
            company_name: "Tech Solutions".to_string(),
            start_date: day(2023, 10, 1),
            end_date: day(2023, 10, 7),
            activities: "Instalación del entorno de desarrollo, revisión de documentación del \
                         proyecto, reunión inicial con el equipo."
                .to_string(),
            learnings: "Aprendí sobre la arquitectura del sistema y buenas prácticas de \
                        desarrollo."
                .to_string(),
            difficulties: Some("Puntos complejos de configuración del entorno.".to_string()),
            recommendations: Some(
                "Documentar los procesos de instalación para nuevos practicantes.".to_string(),
            ),
            submission_date: day(2023, 10, 8),
            status: ReportStatus::Approved,
            feedback: Some(
                "Buen trabajo inicial. Se recomienda profundizar en la documentación técnica."
                    .to_string(),
            ),
        },
        Report {
            id: ReportId(2),
            title: "Informe de práctica - Segunda semana".to_string(),
            content: "Esta semana trabajé en el desarrollo de nuevos componentes para la \
                      aplicación web utilizando React."
                .to_string(),
            student_name: "María García".to_string(),
            company_name: "Creative Agency".to_string(),
            start_date: day(2023, 10, 8),
            end_date: day(2023, 10, 14),
            activities: "Desarrollo de componentes React, revisión de código con el equipo, \
                         participación en reuniones de planificación."
                .to_string(),
            learnings: "Mejoré mis habilidades en React y aprendí sobre el flujo de trabajo de \
                        desarrollo en equipo."
                .to_string(),
            difficulties: Some("Integración con APIs complejas.".to_string()),
            recommendations: Some(
                "Ofrecer más talleres sobre manejo de estado en aplicaciones React.".to_string(),
            ),
            submission_date: day(2023, 10, 15),
            status: ReportStatus::Pending,
            feedback: None,
        },
    ]
}
