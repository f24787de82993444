//! The built-in source list shipped with the directory page.
//!
//! Adopted when neither the primary backend nor the device-local snapshot
//! has anything to show.

use super::types::JobSource;

const DEFAULT_SOURCES: &[(&str, &str, &str)] = &[
    (
        "1",
        "LinkedIn",
        "https://www.linkedin.com/jobs/search/?currentJobId=4235127935&f_JT=I&geoId=101620260&keywords=mechanical%20engineer%20student&origin=JOB_SEARCH_PAGE_LOCATION_AUTOCOMPLETE&originalSubdomain=il&refresh=true",
    ),
    (
        "2",
        "Glassdoor",
        "https://www.glassdoor.com/Job/israel-mechanical-engineering-student-jobs-SRCH_IL.0,6_IN119_KO7,37.htm",
    ),
    (
        "3",
        "AllJobs",
        "https://www.alljobs.co.il/SearchResultsGuest.aspx?page=1&position=1047&type=&source=&duration=0&exc=&region=",
    ),
    (
        "4",
        "JobMaster",
        "https://www.jobmaster.co.il/jobs/?q=מהנדס%20מכונות%20סטודנט&l=",
    ),
    (
        "5",
        "Drushim",
        "https://www.drushim.co.il/jobs/?searchterm=מהנדס%20מכונות%20סטודנט",
    ),
    (
        "6",
        "SQLink",
        "https://www.sqlink.com/career?search=engineering%20intern&type=internship",
    ),
    (
        "7",
        "Intel Israel",
        "https://jobs.intel.com/en_US/search?keywords=engineering%20intern&location=Israel",
    ),
    (
        "8",
        "Elbit Systems",
        "https://elbitsystemscareer.com/go/סטודנטים/9275855/",
    ),
    (
        "9",
        "IAI (אלתא)",
        "https://jobs.iai.co.il/jobs/?tp=משרת%20סטודנט",
    ),
    ("10", "רפאל (Rafael)", "https://career.rafael.co.il/students/"),
    ("11", "HP Careers", "https://jobs.hp.com/us/students-graduates/"),
    (
        "12",
        "Applied Materials",
        "https://jobs.appliedmaterials.com/location/israel-jobs/95/294640?q=student",
    ),
    ("13", "Art Medical", "https://artmedical.com/careers/?search=intern"),
    ("14", "Arad Technologies", "https://aradtec.com/careers/?search=student"),
    ("15", "Orbit Technologies", "https://orbit-cs.com/careers/?search=intern"),
    ("16", "Ness Technologies", "https://www.ness.com/careers/?search=intern"),
    ("17", "Amarel", "https://www.amarel.net/careers-tags/students/"),
];

/// Returns the built-in default source list, in display order.
pub fn default_sources() -> Vec<JobSource> {
    DEFAULT_SOURCES
        .iter()
        .map(|(id, name, url)| JobSource::new(*id, *name, *url))
        .collect()
}
