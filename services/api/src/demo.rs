use chrono::Utc;
use clap::Args;
use jobster::applications::{
    Actor, ActorId, ActorRole, ApplicationError, ApplicationForm, ApplicationServices,
    InMemoryStores, JobId, JobPosting, ResumeAttachment, ResumeUpload,
};
use jobster::config::ApplicationConfig;
use jobster::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Applications per page when listing a job's applicants
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
    /// Attach a freshly uploaded resume instead of relying on the profile resume
    #[arg(long)]
    pub(crate) upload_resume: bool,
    /// Stop after the submission portion of the demo
    #[arg(long)]
    pub(crate) skip_withdrawal: bool,
}

const EMPLOYER: &str = "demo-employer";
const SEEKER: &str = "demo-seeker";
const JOB: &str = "demo-job";

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        page_size,
        upload_resume,
        skip_withdrawal,
    } = args;

    let memory = InMemoryStores::default();
    seed_demo_directory(&memory)?;
    let mut config = ApplicationConfig::default();
    if let Some(page_size) = page_size {
        config.page_size = page_size;
    }
    let services = ApplicationServices::new(memory.stores(), config);

    let employer = demo_actor(&services, EMPLOYER)?;
    let seeker = demo_actor(&services, SEEKER)?;
    let job_id = JobId(JOB.to_string());

    println!("Application lifecycle demo ({})", Utc::now().format("%Y-%m-%d"));
    println!(
        "- Employer {} posted '{}' | job seeker {} is applying",
        employer.name, JOB, seeker.name
    );

    let upload = upload_resume.then(|| ResumeUpload {
        file_name: "grace-hopper.pdf".to_string(),
        content_type: Some("application/pdf".to_string()),
        bytes: b"%PDF-1.7 demo resume".to_vec(),
    });
    let application = match services
        .submission
        .submit(&seeker, &job_id, demo_form(), upload)
        .await
    {
        Ok(application) => application,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Submitted application {} for {} on {}",
        application.id,
        application.job_info.job_title,
        application.applied_on.format("%Y-%m-%d %H:%M")
    );
    println!("  Resume: {}", application.job_seeker_info.resume.url);

    match services
        .submission
        .submit(&seeker, &job_id, demo_form(), None)
        .await
    {
        Err(ApplicationError::Conflict) => {
            println!("- Second submission refused: {}", ApplicationError::Conflict)
        }
        Err(err) => println!("- Second submission failed unexpectedly: {}", err),
        Ok(duplicate) => println!("- Second submission was accepted as {}", duplicate.id),
    }

    print_job_page(&services, &job_id);
    print_role_lists(&services, &employer, &seeker);

    if skip_withdrawal {
        return Ok(());
    }

    println!("\nWithdrawal");
    for role in [ActorRole::Employer, ActorRole::Employer, ActorRole::JobSeeker] {
        let outcome = services.deletion.delete(&application.id, role)?;
        println!(
            "- {} deleted: {} -> {}{}",
            role.label(),
            outcome.previous.label(),
            outcome.current.label(),
            if outcome.changed() { "" } else { " (no change)" }
        );
        print_role_lists(&services, &employer, &seeker);
    }

    match services.deletion.delete(&application.id, ActorRole::Employer) {
        Err(err) => println!("- Deleting again: {}", err),
        Ok(outcome) => println!("- Deleting again left it {}", outcome.current.label()),
    }
    print_job_page(&services, &job_id);

    Ok(())
}

fn seed_demo_directory(memory: &InMemoryStores) -> Result<(), AppError> {
    memory.actors.register(Actor {
        id: ActorId(EMPLOYER.to_string()),
        role: ActorRole::Employer,
        name: "Harbor Compilers".to_string(),
        email: "talent@harbor.example".to_string(),
        bio: None,
        profile_photo: None,
        niches: Vec::new(),
        resume: None,
    })?;
    memory.actors.register(Actor {
        id: ActorId(SEEKER.to_string()),
        role: ActorRole::JobSeeker,
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        bio: Some("Compilers and debugging".to_string()),
        profile_photo: None,
        niches: vec!["Compilers".to_string()],
        resume: Some(ResumeAttachment {
            object_id: "Job_Seekers_Resume/grace".to_string(),
            url: "memory://resumes/profile/grace.pdf".to_string(),
        }),
    })?;
    memory.jobs.register(JobPosting {
        id: JobId(JOB.to_string()),
        title: "Compiler Engineer".to_string(),
        posted_by: ActorId(EMPLOYER.to_string()),
    })?;
    Ok(())
}

fn demo_actor(services: &ApplicationServices, id: &str) -> Result<Actor, AppError> {
    Ok(services.authenticate(&ActorId(id.to_string()))?)
}

fn demo_form() -> ApplicationForm {
    ApplicationForm {
        name: Some("Grace Hopper".to_string()),
        email: Some("grace@example.com".to_string()),
        phone: Some("555-0199".to_string()),
        address: Some("1 Navy Yard".to_string()),
        cover_letter: Some("I would like to help your compiler grow up.".to_string()),
    }
}

fn print_job_page(services: &ApplicationServices, job_id: &JobId) {
    println!(
        "\nApplicants for {} (page size {})",
        job_id,
        services.access.page_size()
    );
    match services.access.list_for_job(job_id, 1) {
        Ok(page) => {
            println!("- {} page(s)", page.total_pages);
            for summary in &page.applications {
                let applicant = summary
                    .applicant
                    .as_ref()
                    .map(|view| view.name.as_str())
                    .unwrap_or("unknown applicant");
                println!("  - {} from {}", summary.id, applicant);
            }
        }
        Err(err) => println!("- Listing unavailable: {}", err),
    }
}

fn print_role_lists(
    services: &ApplicationServices,
    employer: &Actor,
    seeker: &Actor,
) {
    let for_employer = services
        .access
        .list_for_employer(&employer.id)
        .map(|list| list.len());
    let for_seeker = services
        .access
        .list_for_job_seeker(&seeker.id)
        .map(|list| list.len());
    match (for_employer, for_seeker) {
        (Ok(employer_count), Ok(seeker_count)) => println!(
            "  Visible to employer: {} | visible to job seeker: {}",
            employer_count, seeker_count
        ),
        (Err(err), _) | (_, Err(err)) => println!("  Lists unavailable: {}", err),
    }
}
