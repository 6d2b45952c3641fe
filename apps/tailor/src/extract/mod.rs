// Text extraction for the two pipeline inputs: the job posting page and the resume PDF.
// Network and PDF decoding sit behind traits so the pipeline can run against stubs.

pub mod job_page;
pub mod resume_pdf;

pub use job_page::{extract_job_description, HttpPageFetcher, PageFetcher};
pub use resume_pdf::{PdfResumeExtractor, ResumeExtractor};
