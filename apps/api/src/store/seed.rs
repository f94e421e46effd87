//! Demo data loaded at startup. State resets to this on every restart.

use crate::models::{CustomQuestion, Job, JobType, NoticePeriod, UserProfile};

pub const DEFAULT_RESUME: &str = "
Jane Doe
Software Engineer
Summary: Passionate developer with 4 years of experience building scalable web applications. Loves React and Python.
Skills: JavaScript, TypeScript, React, Python, Node.js, SQL.
Experience:
- Frontend Dev at StartUp Inc (2021-Present): Built dashboard using React.
- Junior Dev at Legacy Corp (2019-2021): Maintained internal tools.
";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn question(id: &str, text: &str) -> CustomQuestion {
    CustomQuestion {
        id: id.to_string(),
        question: text.to_string(),
        required: true,
    }
}

pub fn default_profile() -> UserProfile {
    UserProfile {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        resume_text: DEFAULT_RESUME.to_string(),
        resume_file_name: None,
        skills: strings(&["React", "TypeScript", "Node.js", "Python"]),
        experience_years: 4,
    }
}

pub fn mock_jobs() -> Vec<Job> {
    vec![
        Job {
            id: "1".to_string(),
            title: "Senior Frontend Engineer".to_string(),
            company: "TechFlow Solutions".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary_range: "$120k - $160k".to_string(),
            description: "We are looking for a React expert to lead our frontend team. \
                You will be responsible for architecture and mentorship."
                .to_string(),
            requirements: strings(&["React", "TypeScript", "Tailwind CSS", "5+ years experience"]),
            tags: strings(&["React", "TypeScript", "Frontend", "Web Design"]),
            posted_at: "2 days ago".to_string(),
            experience_required: 5,
            notice_period: NoticePeriod::Days(30),
            custom_questions: vec![],
        },
        Job {
            id: "2".to_string(),
            title: "Python Backend Developer".to_string(),
            company: "DataStream Inc".to_string(),
            location: "New York, NY".to_string(),
            job_type: JobType::FullTime,
            salary_range: "$110k - $150k".to_string(),
            description: "Build robust APIs using Python and Django. \
                Experience with large scale data processing is a plus."
                .to_string(),
            requirements: strings(&["Python", "Django", "PostgreSQL", "Redis"]),
            tags: strings(&["Python", "Django", "Backend", "SQL"]),
            posted_at: "1 day ago".to_string(),
            experience_required: 3,
            notice_period: NoticePeriod::IMMEDIATE,
            custom_questions: vec![question("q1", "Do you have experience with Celery?")],
        },
        Job {
            id: "3".to_string(),
            title: "AI/ML Intern".to_string(),
            company: "FutureMind AI".to_string(),
            location: "San Francisco, CA".to_string(),
            job_type: JobType::Internship,
            salary_range: "$40/hr".to_string(),
            description: "Join our research team to work on LLM fine-tuning and evaluation pipelines."
                .to_string(),
            requirements: strings(&["Python", "PyTorch", "Basic ML knowledge"]),
            tags: strings(&["Python", "Machine Learning", "LLM", "AI", "OpenAI"]),
            posted_at: "4 hours ago".to_string(),
            experience_required: 0,
            notice_period: NoticePeriod::IMMEDIATE,
            custom_questions: vec![],
        },
        Job {
            id: "4".to_string(),
            title: "Product Marketing Manager".to_string(),
            company: "GrowthRocket".to_string(),
            location: "Austin, TX".to_string(),
            job_type: JobType::FullTime,
            salary_range: "$90k - $120k".to_string(),
            description: "Drive the go-to-market strategy for our new SaaS product line.".to_string(),
            requirements: strings(&["Marketing Strategy", "Content Writing", "SEO", "Analytics"]),
            tags: strings(&["Marketing", "SEO", "Content", "SaaS"]),
            posted_at: "3 days ago".to_string(),
            experience_required: 4,
            notice_period: NoticePeriod::Days(60),
            custom_questions: vec![question("q2", "Link to your writing portfolio")],
        },
        Job {
            id: "5".to_string(),
            title: "DevOps Engineer".to_string(),
            company: "CloudScale".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::Contract,
            salary_range: "$80 - $120 / hr".to_string(),
            description: "Maintain and improve our Kubernetes infrastructure and CI/CD pipelines."
                .to_string(),
            requirements: strings(&["AWS", "Kubernetes", "Terraform", "Jenkins"]),
            tags: strings(&["AWS", "DevOps", "Kubernetes", "Cloud"]),
            posted_at: "1 week ago".to_string(),
            experience_required: 5,
            notice_period: NoticePeriod::Days(15),
            custom_questions: vec![],
        },
    ]
}
