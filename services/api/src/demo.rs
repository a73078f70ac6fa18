use chrono::{Local, NaiveDate};
use clap::Args;
use practice_portal::config::AppConfig;
use practice_portal::error::AppError;
use practice_portal::workflows::reports::{ReportDraft, ReportStatus};
use practice_portal::workflows::vacancies::{ApplyOutcome, VacancyDraft};
use practice_portal::workflows::{FieldErrors, Notice, Portal, Role};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date stamped on new vacancies, applications and reports (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let portal = Portal::in_memory(&config.portal);

    println!("Practice portal demo ({today})");
    registration_walkthrough(&portal);
    vacancy_walkthrough(&portal, today);
    report_walkthrough(&portal, today);
    Ok(())
}

fn registration_walkthrough(portal: &Portal) {
    println!("\nRegistration");
    let desk = &portal.registration;
    desk.select_role(Role::Student);
    for (field, value) in [
        ("email", "ana.quispe@example.com"),
        ("password", "practica2025"),
        ("confirmPassword", "practica2025"),
        ("career", "Ingeniería de Software"),
        ("university", "UNI"),
        ("semester", "8"),
    ] {
        if let Err(err) = desk.update_field(field, value) {
            println!("  Field rejected: {err}");
        }
    }

    if let Err(err) = desk.submit() {
        println!("- Submitted without a name: {err}");
        print_errors(&desk.errors());
    }

    if let Err(err) = desk.update_field("name", "Ana Quispe") {
        println!("  Field rejected: {err}");
    }
    match desk.submit() {
        Ok(accepted) => {
            println!(
                "- Registered {} <{}> as {}",
                accepted.value.display_name,
                accepted.value.email,
                accepted.value.role.display_name()
            );
            print_notice(portal.registration.notices().current());
        }
        Err(err) => println!("  Registration rejected: {err}"),
    }
}

fn vacancy_walkthrough(portal: &Portal, today: NaiveDate) {
    println!("\nVacancies");
    let board = &portal.vacancies;

    let draft = VacancyDraft {
        title: "Practicante de Desarrollo Backend".to_string(),
        company: "Andes Cloud".to_string(),
        description: "Mantenimiento de servicios internos y APIs.".to_string(),
        requirements: "Programación básica, Git, SQL".to_string(),
        benefits: "Mentoría semanal, horario flexible".to_string(),
        location: "Trujillo".to_string(),
        mode: "híbrido".to_string(),
        duration: "4 meses".to_string(),
    };
    let vacancy = match board.post_vacancy(draft, today) {
        Ok(accepted) => {
            println!(
                "- Posted vacancy {} \"{}\" ({}, {})",
                accepted.value.id,
                accepted.value.title,
                accepted.value.location,
                accepted.value.mode.label()
            );
            print_notice(board.notices().current());
            accepted.value
        }
        Err(err) => {
            println!("  Posting rejected: {err}");
            return;
        }
    };

    for attempt in 1..=2 {
        match board.apply(vacancy.id, today) {
            Ok(ApplyOutcome::Applied { application, .. }) => println!(
                "- Attempt {attempt}: application {} filed by {}",
                application.id, application.student_name
            ),
            Ok(ApplyOutcome::AlreadyApplied { .. }) => {
                println!("- Attempt {attempt}: guarded, nothing recorded")
            }
            Err(err) => println!("- Attempt {attempt}: {err}"),
        }
        print_notice(board.notices().current());
    }

    match board.company_view() {
        Ok(rows) => {
            println!("Company view:");
            for row in rows {
                println!(
                    "  - [{}] {} @ {} | {} application(s)",
                    row.vacancy.id, row.vacancy.title, row.vacancy.company, row.application_count
                );
            }
        }
        Err(err) => println!("  Company view unavailable: {err}"),
    }
}

fn report_walkthrough(portal: &Portal, today: NaiveDate) {
    println!("\nReports");
    let desk = &portal.reports;

    let draft = ReportDraft {
        title: "Informe de práctica - Semana de cierre".to_string(),
        content: String::new(),
        start_date: "2025-04-21".to_string(),
        end_date: "2025-04-27".to_string(),
        activities: "Pruebas de regresión y documentación de la API.".to_string(),
        learnings: "Diseño de contratos entre servicios.".to_string(),
        difficulties: String::new(),
        recommendations: "Ampliar el entorno de pruebas.".to_string(),
    };
    if let Err(err) = desk.submit_report(draft.clone(), today) {
        println!("- Submitted without content: {err}");
        print_errors(&desk.errors());
    }

    let report = match desk.submit_report(
        ReportDraft {
            content: "Cerré las tareas pendientes del sprint y entregué la documentación."
                .to_string(),
            ..draft
        },
        today,
    ) {
        Ok(accepted) => {
            println!(
                "- Report {} submitted by {} ({})",
                accepted.value.id, accepted.value.student_name, accepted.value.status
            );
            accepted.value
        }
        Err(err) => {
            println!("  Report rejected: {err}");
            return;
        }
    };

    match desk.pending_review() {
        Ok(pending) => println!("- {} report(s) awaiting review", pending.len()),
        Err(err) => println!("  Review queue unavailable: {err}"),
    }

    match desk.set_status(report.id, ReportStatus::Approved) {
        Ok(_) => print_notice(desk.notices().current()),
        Err(err) => println!("  Status change rejected: {err}"),
    }

    match desk.view_report(report.id) {
        Ok(disclosure) => println!("{}", disclosure.message),
        Err(err) => println!("  Report unavailable: {err}"),
    }
}

fn print_errors(errors: &FieldErrors) {
    for field in errors.fields() {
        if let Some(message) = errors.get(field) {
            println!("    {field}: {message}");
        }
    }
}

fn print_notice(notice: Option<Notice>) {
    if let Some(notice) = notice {
        println!("  [{:?}] {}", notice.kind, notice.message);
    }
}
