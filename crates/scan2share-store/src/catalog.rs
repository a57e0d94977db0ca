use scan2share_types::{Company, Gig, Job, NewCompany, NewGig, NewJob};

use crate::state::{AppState, new_id};

impl AppState {
    pub fn add_company(&self, company: NewCompany) -> (Self, Company) {
        let company = Company {
            id: new_id(),
            name: company.name,
            industry: company.industry,
            description: company.description,
            location: company.location,
            employees: company.employees,
            rating: company.rating,
            website: company.website,
            founded: company.founded,
        };

        let mut next = self.clone();
        next.companies.insert(0, company.clone());
        (next, company)
    }

    pub fn add_job(&self, job: NewJob) -> (Self, Job) {
        let job = Job {
            id: new_id(),
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            salary: job.salary,
            posted: job.posted,
            skills: job.skills,
            description: job.description,
            requirements: job.requirements,
            benefits: job.benefits,
        };

        let mut next = self.clone();
        next.jobs.insert(0, job.clone());
        (next, job)
    }

    pub fn add_gig(&self, gig: NewGig) -> (Self, Gig) {
        let gig = Gig {
            id: new_id(),
            title: gig.title,
            client: gig.client,
            budget: gig.budget,
            duration: gig.duration,
            level: gig.level,
            category: gig.category,
            description: gig.description,
            skills: gig.skills,
            posted: gig.posted,
            location: gig.location,
            pricing: gig.pricing,
        };

        let mut next = self.clone();
        next.gigs.insert(0, gig.clone());
        (next, gig)
    }
}
