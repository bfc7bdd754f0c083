// src/clients/course.rs

//! Course catalog client.
//!
//! Fetches term/subject listings from the PeopleSoft mobile catalog and
//! parses them into [`Subject`] → [`Course`] → [`Section`] records. The
//! listing markup is not a documented format: course blocks are the sibling
//! list around `div.primary-head`, where elements carrying a `class`
//! attribute are course headings and bare anchors are section rows of
//! `Label: value` lines.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::header::{COOKIE, SET_COOKIE};
use scraper::{ElementRef, Html};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{Course, Enrollment, Section, Subject};
use crate::utils::http::{create_client, ensure_success, parse_selector};
use crate::utils::{clean_text, labeled_value, resolve_url};

const CLASS_SEARCH_URL: &str = "https://psmobile.pitt.edu/app/catalog/classSearch";
const CLASS_SEARCH_API_URL: &str = "https://psmobile.pitt.edu/app/catalog/getClassSearch";

/// Subject codes accepted by the catalog.
pub const SUBJECTS: &[&str] = &[
    "ADMJ", "ADMPS", "AFRCNA", "AFROTC", "ANTH", "ARABIC", "ARTSC", "ASL", "ASTRON", "ATHLTR",
    "BACC", "BCHS", "BECN", "BFAE", "BFIN", "BHRM", "BIND", "BIOENG", "BIOETH", "BIOINF", "BIOSC",
    "BIOST", "BMIS", "BMKT", "BOAH", "BORG", "BQOM", "BSEO", "BSPP", "BUS", "BUSACC", "BUSADM",
    "BUSBIS", "BUSECN", "BUSENV", "BUSERV", "BUSFIN", "BUSHRM", "BUSMKT", "BUSORG", "BUSQOM",
    "BUSSCM", "BUSSPP", "CDACCT", "CDENT", "CEE", "CGS", "CHE", "CHEM", "CHIN", "CLASS", "CLRES",
    "CLST", "CMME", "CMMUSIC", "CMPBIO", "CMPINF", "COE", "COEA", "COEE", "COMMRC", "CS", "CSD",
    "DENHYG", "DENT", "DIASCI", "DMED", "DSANE", "DUPOSC", "EAS", "ECE", "ECON", "EDUC", "EM",
    "ENDOD", "ENGCMP", "ENGFLM", "ENGLIT", "ENGR", "ENGSCI", "ENGWRT", "ENRES", "EOH", "EPIDEM",
    "FACDEV", "FILMG", "FILMST", "FP", "FR", "FTADMA", "FTDA", "FTDB", "FTDC", "FTDJ", "FTDR",
    "GEOL", "GER", "GERON", "GREEK", "GREEKM", "GSWS", "HAA", "HEBREW", "HIM", "HINDI", "HIST",
    "HONORS", "HPA", "HPM", "HPS", "HRS", "HUGEN", "IDM", "IE", "IL", "IMB", "INFSCI", "INTBP",
    "IRISH", "ISB", "ISSP", "ITAL", "JPNSE", "JS", "KOREAN", "LATIN", "LAW", "LCTL", "LDRSHP",
    "LEGLST", "LING", "LIS", "LSAP", "MATH", "ME", "MED", "MEDEDU", "MEMS", "MILS", "MOLBPH",
    "MSBMS", "MSCBIO", "MSCBMP", "MSCMP", "MSE", "MSMBPH", "MSMGDB", "MSMI", "MSMPHL", "MSMVM",
    "MSNBIO", "MUSIC", "NEURO", "NPHS", "NROSCI", "NUR", "NURCNS", "NURNM", "NURNP", "NURSAN",
    "NURSP", "NUTR", "ODO", "ORBIOL", "ORSUR", "OT", "PAS", "PEDC", "PEDENT", "PEDS", "PERIO",
    "PERS", "PETE", "PHARM", "PHIL", "PHYS", "PIA", "POLISH", "PORT", "PROSTH", "PS", "PSY",
    "PSYC", "PSYED", "PT", "PUBHLT", "PUBSRV", "PWEA", "QUECH", "REHSCI", "REL", "RELGST",
    "RESTD", "RUSS", "SA", "SERCRO", "SLAV", "SLOVAK", "SOC", "SOCWRK", "SPAN", "STAT", "SWAHIL",
    "SWBEH", "SWCED", "SWCOSA", "SWE", "SWGEN", "SWINT", "SWRES", "SWWEL", "TELCOM", "THEA",
    "TURKSH", "UKRAIN", "URBNST", "VIET",
];

/// Client for the course catalog endpoint.
pub struct CourseClient {
    client: Client,
}

impl CourseClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client with explicit settings.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    /// Fetch all courses offered in `term` under `subject`.
    pub fn get_term_courses(&self, term: &str, subject: &str) -> Result<Subject> {
        let term = validate_term(term)?;
        let subject = validate_subject(subject)?;
        let document = self.search(&term, &subject, "", "")?;
        let courses = parse_subject_listing(&document, &term, &subject)?;
        Ok(Subject {
            subject,
            term,
            courses,
        })
    }

    /// Fetch all sections taught in one course.
    pub fn get_course_sections(&self, term: &str, subject: &str, course: &str) -> Result<Course> {
        let term = validate_term(term)?;
        let subject = validate_subject(subject)?;
        let course = validate_course(course)?;
        let document = self.search(&term, &subject, &course, "")?;
        let courses = parse_subject_listing(&document, &term, &subject)?;
        courses
            .into_values()
            .find(|c| c.number == course)
            .ok_or_else(|| Error::not_found("course", format!("{subject} {course}")))
    }

    /// Fetch one section by its registrar class number.
    pub fn get_section_details(&self, term: &str, class_number: &str) -> Result<Section> {
        let term = validate_term(term)?;
        let document = self.search(&term, "", "", class_number)?;
        parse_section_page(&document, &term)?
            .ok_or_else(|| Error::not_found("section", class_number.to_string()))
    }

    /// Run one catalog search and return the parsed response page.
    ///
    /// The endpoint requires a CSRF token issued as a cookie on the search
    /// page, echoed back in both the cookie and the form body.
    fn search(&self, term: &str, subject: &str, course: &str, section: &str) -> Result<Html> {
        let token = self.fetch_csrf_token()?;
        let payload = [
            ("CSRFToken", token.as_str()),
            ("term", term),
            ("campus", "PIT"),
            ("subject", subject),
            ("acad_career", ""),
            ("catalog_nbr", course),
            ("class_nbr", section),
        ];
        let response = self
            .client
            .post(CLASS_SEARCH_API_URL)
            .header(COOKIE, format!("CSRFCookie={token}"))
            .form(&payload)
            .send()?;
        let response = ensure_success(response, "class search")?;
        Ok(Html::parse_document(&response.text()?))
    }

    fn fetch_csrf_token(&self) -> Result<String> {
        let response = ensure_success(self.client.get(CLASS_SEARCH_URL).send()?, "class search")?;
        for value in response.headers().get_all(SET_COOKIE) {
            let Ok(cookie) = value.to_str() else { continue };
            if let Some(rest) = cookie.strip_prefix("CSRFCookie=") {
                let token = rest.split(';').next().unwrap_or(rest).trim();
                if !token.is_empty() {
                    return Ok(token.to_string());
                }
            }
        }
        Err(Error::unexpected("class search", "CSRFCookie was not set"))
    }
}

/// Fetch all courses offered in `term` under `subject` with default settings.
pub fn get_term_courses(term: &str, subject: &str) -> Result<Subject> {
    CourseClient::new()?.get_term_courses(term, subject)
}

/// Fetch all sections taught in one course with default settings.
pub fn get_course_sections(term: &str, subject: &str, course: &str) -> Result<Course> {
    CourseClient::new()?.get_course_sections(term, subject, course)
}

/// Fetch one section by registrar class number with default settings.
pub fn get_section_details(term: &str, class_number: &str) -> Result<Section> {
    CourseClient::new()?.get_section_details(term, class_number)
}

// --- Validation ---

/// Term codes follow the registrar pattern: 2, two digits, then 1/4/7.
fn validate_term(term: &str) -> Result<String> {
    let valid = regex::Regex::new(r"^2\d\d[147]$").expect("static regex");
    if valid.is_match(term) {
        Ok(term.to_string())
    } else {
        Err(Error::validation(format!("invalid term code: {term}")))
    }
}

fn validate_subject(subject: &str) -> Result<String> {
    let subject = subject.to_uppercase();
    if SUBJECTS.contains(&subject.as_str()) {
        Ok(subject)
    } else {
        Err(Error::validation(format!("unknown subject: {subject}")))
    }
}

/// Course numbers are zero-padded to four digits.
fn validate_course(course: &str) -> Result<String> {
    if course.is_empty() || course.len() > 4 || !course.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation(format!("invalid course number: {course}")));
    }
    Ok(format!("{course:0>4}"))
}

// --- Parsing ---

/// Parse a listing page into courses keyed by course number.
///
/// Duplicate headings for the same course number merge into the existing
/// course; duplicate section rows append in document order.
fn parse_subject_listing(
    document: &Html,
    term: &str,
    subject: &str,
) -> Result<BTreeMap<String, Course>> {
    let mut courses: BTreeMap<String, Course> = BTreeMap::new();
    let mut current: Option<String> = None;

    for element in listing_elements(document)? {
        if element.value().attr("class").is_some() {
            let heading = clean_text(&element.text().collect::<String>());
            if heading.is_empty() {
                continue;
            }
            match parse_course_heading(&heading) {
                Some((number, title)) => {
                    courses.entry(number.clone()).or_insert_with(|| Course {
                        subject: subject.to_string(),
                        term: term.to_string(),
                        number: number.clone(),
                        title,
                        sections: Vec::new(),
                    });
                    current = Some(number);
                }
                None => log::warn!("skipping unrecognized course heading: {heading}"),
            }
        } else if element.value().name() == "a" {
            let Some(number) = current.as_deref() else {
                log::warn!("section row before any course heading, skipping");
                continue;
            };
            if let Some(section) = parse_section_row(&element, term, subject, number) {
                if let Some(course) = courses.get_mut(number) {
                    course.sections.push(section);
                }
            }
        }
    }

    if courses.is_empty() {
        return Err(Error::parse(
            "course listing",
            format!("no course blocks found for {subject} in {term}"),
        ));
    }
    Ok(courses)
}

/// Parse a single-section response page into at most one section.
fn parse_section_page(document: &Html, term: &str) -> Result<Option<Section>> {
    let mut subject = String::new();
    let mut number = String::new();

    for element in listing_elements(document)? {
        if element.value().attr("class").is_some() {
            let heading = clean_text(&element.text().collect::<String>());
            if let Some((num, _)) = parse_course_heading(&heading) {
                subject = heading.split_whitespace().next().unwrap_or("").to_string();
                number = num;
            }
        } else if element.value().name() == "a" {
            return Ok(parse_section_row(&element, term, &subject, &number));
        }
    }
    Ok(None)
}

/// The sibling list that holds course headings and section anchors.
fn listing_elements(document: &Html) -> Result<Vec<ElementRef<'_>>> {
    let head_sel = parse_selector("div.primary-head")?;
    let first_head = document
        .select(&head_sel)
        .next()
        .ok_or_else(|| Error::parse("course listing", "no primary-head marker in page"))?;
    let container = first_head
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or_else(|| Error::parse("course listing", "primary-head has no parent element"))?;
    Ok(container.children().filter_map(ElementRef::wrap).collect())
}

/// Split a heading like `"CS 0007 - INTRODUCTION TO COMPUTER PROGRAMMING"`.
fn parse_course_heading(heading: &str) -> Option<(String, String)> {
    let (designation, title) = heading.split_once(" - ")?;
    let number = designation.split_whitespace().nth(1)?;
    if number.is_empty() {
        return None;
    }
    Some((format!("{number:0>4}"), title.trim().to_string()))
}

/// Parse one section anchor into a [`Section`].
///
/// A row without a recognizable `Section:` line is unusable and dropped;
/// every other missing field defaults to `None`.
fn parse_section_row(
    element: &ElementRef<'_>,
    term: &str,
    subject: &str,
    course_number: &str,
) -> Option<Section> {
    let text: String = element.text().collect();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let Some((section, section_type, class_number)) =
        labeled_value(&lines, "Section").and_then(parse_section_id)
    else {
        log::warn!("section row without a parsable Section line, skipping");
        return None;
    };

    let (days, times) = labeled_value(&lines, "Days/Times")
        .map(parse_days_times)
        .unwrap_or((None, None));
    let (start_date, end_date) = labeled_value(&lines, "Meeting Dates")
        .map(parse_meeting_dates)
        .unwrap_or((None, None));

    let href = element.value().attr("href").unwrap_or("");
    let url = url::Url::parse(CLASS_SEARCH_URL)
        .map(|base| resolve_url(&base, href))
        .unwrap_or_else(|_| href.to_string());

    Some(Section {
        subject: subject.to_string(),
        term: term.to_string(),
        course_number: course_number.to_string(),
        section,
        section_type,
        class_number,
        days,
        times,
        room: labeled_value(&lines, "Room").map(str::to_string),
        instructor: labeled_value(&lines, "Instructor").map(str::to_string),
        start_date,
        end_date,
        status: labeled_value(&lines, "Status").map(str::to_string),
        enrollment: labeled_value(&lines, "Enrollment").and_then(parse_enrollment),
        url,
    })
}

/// Split `"1000-LEC (27378)"` into (section, type, class number).
fn parse_section_id(value: &str) -> Option<(String, String, String)> {
    let mut parts = value.split_whitespace();
    let (section, section_type) = parts.next()?.split_once('-')?;
    let class_number: String = parts
        .next()?
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if section.is_empty() || class_number.is_empty() {
        return None;
    }
    Some((
        section.to_string(),
        section_type.to_string(),
        class_number,
    ))
}

/// Split `"MoWe 3:00PM - 4:15PM"` into day codes and a time span.
///
/// `TBA` and anything unrecognizable yield `(None, None)`.
#[allow(clippy::type_complexity)]
fn parse_days_times(value: &str) -> (Option<Vec<String>>, Option<(String, String)>) {
    if value.eq_ignore_ascii_case("TBA") {
        return (None, None);
    }
    let Some((left, end)) = value.split_once(" - ") else {
        log::warn!("unrecognized Days/Times value: {value}");
        return (None, None);
    };
    let Some((day_str, start)) = left.rsplit_once(' ') else {
        log::warn!("unrecognized Days/Times value: {value}");
        return (None, None);
    };
    // Day codes are two ASCII characters each (Mo, Tu, We, ...)
    let days = day_str
        .as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).to_string())
        .collect();
    (
        Some(days),
        Some((start.trim().to_string(), end.trim().to_string())),
    )
}

/// Split `"08/26/2019 - 12/06/2019"` into start and end dates.
fn parse_meeting_dates(value: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut parts = value.split(" - ");
    let start = parts
        .next()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%m/%d/%Y").ok());
    let end = parts
        .next()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%m/%d/%Y").ok());
    (start, end)
}

/// Parse `"45/60"` enrollment counts.
fn parse_enrollment(value: &str) -> Option<Enrollment> {
    let (current, capacity) = value.split_once('/')?;
    Some(Enrollment {
        current: current.trim().parse().ok()?,
        capacity: capacity.trim().parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_FIXTURE: &str = r#"
        <div class="section-content">
            <div class="primary-head">CS 0007 - INTRODUCTION TO COMPUTER PROGRAMMING</div>
            <a href="/app/catalog/classsection/UPITT/2194/27378">
Section: 1000-LEC (27378)
Session: Academic Term
Days/Times: MoWe 3:00PM - 4:15PM
Room: 5502 Sennott Square
Instructor: John Ramirez
Meeting Dates: 08/26/2019 - 12/06/2019
Status: Open</a>
            <a href="/app/catalog/classsection/UPITT/2194/27379">
Section: 1010-REC (27379)
Session: Academic Term
Days/Times: TBA
Room: TBA
Instructor: Staff
Meeting Dates: 08/26/2019 - 12/06/2019
Status: Open</a>
            <div class="primary-head">CS 0401 - INTERMEDIATE PROGRAMMING USING JAVA</div>
            <a href="/app/catalog/classsection/UPITT/2194/27500">
Section: 1200-LEC (27500)
Session: Academic Term
Days/Times: TuTh 9:30AM - 10:45AM
Room: 205 Lawrence Hall
Instructor: Nick Farnan
Meeting Dates: 08/26/2019 - 12/06/2019
Status: Closed
Enrollment: 45/45</a>
        </div>
    "#;

    #[test]
    fn test_listing_course_numbers_match_fixture() {
        let document = Html::parse_document(LISTING_FIXTURE);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        assert_eq!(
            courses.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["0007", "0401"],
        );
        assert_eq!(courses["0007"].sections.len(), 2);
        assert_eq!(courses["0401"].sections.len(), 1);
    }

    #[test]
    fn test_listing_section_fields() {
        let document = Html::parse_document(LISTING_FIXTURE);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        let section = &courses["0007"].sections[0];

        assert_eq!(section.section, "1000");
        assert_eq!(section.section_type, "LEC");
        assert_eq!(section.class_number, "27378");
        assert_eq!(
            section.days,
            Some(vec!["Mo".to_string(), "We".to_string()])
        );
        assert_eq!(
            section.times,
            Some(("3:00PM".to_string(), "4:15PM".to_string()))
        );
        assert_eq!(section.room.as_deref(), Some("5502 Sennott Square"));
        assert_eq!(section.instructor.as_deref(), Some("John Ramirez"));
        assert_eq!(section.start_date, NaiveDate::from_ymd_opt(2019, 8, 26));
        assert_eq!(section.end_date, NaiveDate::from_ymd_opt(2019, 12, 6));
        assert_eq!(section.status.as_deref(), Some("Open"));
        assert_eq!(
            section.url,
            "https://psmobile.pitt.edu/app/catalog/classsection/UPITT/2194/27378"
        );
    }

    #[test]
    fn test_tba_days_times_default_to_none() {
        let document = Html::parse_document(LISTING_FIXTURE);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        let recitation = &courses["0007"].sections[1];
        assert_eq!(recitation.days, None);
        assert_eq!(recitation.times, None);
    }

    #[test]
    fn test_enrollment_line_parsed_when_present() {
        let document = Html::parse_document(LISTING_FIXTURE);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        assert_eq!(
            courses["0401"].sections[0].enrollment,
            Some(Enrollment {
                current: 45,
                capacity: 45
            })
        );
        assert_eq!(courses["0007"].sections[0].enrollment, None);
    }

    #[test]
    fn test_all_records_share_the_field_set() {
        let document = Html::parse_document(LISTING_FIXTURE);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        let key_sets: Vec<Vec<String>> = courses
            .values()
            .flat_map(|c| c.sections.iter())
            .map(|s| s.to_record().keys().cloned().collect())
            .collect();
        assert!(key_sets.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let document = Html::parse_document(LISTING_FIXTURE);
        let first = parse_subject_listing(&document, "2194", "CS").unwrap();
        let second = parse_subject_listing(&document, "2194", "CS").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_page_is_a_parse_error() {
        let document = Html::parse_document("<html><body><p>No results</p></body></html>");
        assert!(matches!(
            parse_subject_listing(&document, "2194", "CS"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_duplicate_course_heading_merges() {
        // Duplicate heading keys merge: sections under both headings land on
        // the one course, appended in document order with no dedup.
        let fixture = r#"
            <div class="section-content">
                <div class="primary-head">CS 0007 - INTRO</div>
                <a href="/s/1">Section: 1000-LEC (11111)</a>
                <div class="primary-head">CS 0007 - INTRO</div>
                <a href="/s/2">Section: 1000-LEC (11111)</a>
            </div>
        "#;
        let document = Html::parse_document(fixture);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses["0007"].sections.len(), 2);
    }

    #[test]
    fn test_row_missing_fields_defaults_instead_of_failing() {
        let fixture = r#"
            <div class="section-content">
                <div class="primary-head">CS 0007 - INTRO</div>
                <a href="/s/1">Section: 1000-LEC (11111)</a>
            </div>
        "#;
        let document = Html::parse_document(fixture);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        let section = &courses["0007"].sections[0];
        assert_eq!(section.room, None);
        assert_eq!(section.instructor, None);
        assert_eq!(section.status, None);
    }

    #[test]
    fn test_row_without_section_line_is_dropped() {
        let fixture = r#"
            <div class="section-content">
                <div class="primary-head">CS 0007 - INTRO</div>
                <a href="/s/1">Instructor: Staff</a>
            </div>
        "#;
        let document = Html::parse_document(fixture);
        let courses = parse_subject_listing(&document, "2194", "CS").unwrap();
        assert!(courses["0007"].sections.is_empty());
    }

    #[test]
    fn test_section_page_parses_single_section() {
        let fixture = r#"
            <div class="section-content">
                <div class="primary-head">CS 0401 - INTERMEDIATE PROGRAMMING</div>
                <a href="/s/27500">
Section: 1200-LEC (27500)
Days/Times: TuTh 9:30AM - 10:45AM
Room: 205 Lawrence Hall
Instructor: Nick Farnan
Meeting Dates: 08/26/2019 - 12/06/2019</a>
            </div>
        "#;
        let document = Html::parse_document(fixture);
        let section = parse_section_page(&document, "2194").unwrap().unwrap();
        assert_eq!(section.subject, "CS");
        assert_eq!(section.course_number, "0401");
        assert_eq!(section.class_number, "27500");
    }

    #[test]
    fn test_validate_term() {
        assert!(validate_term("2194").is_ok());
        assert!(validate_term("2221").is_ok());
        assert!(validate_term("2190").is_err());
        assert!(validate_term("1194").is_err());
        assert!(validate_term("21944").is_err());
    }

    #[test]
    fn test_validate_subject() {
        assert_eq!(validate_subject("cs").unwrap(), "CS");
        assert!(validate_subject("NOPE").is_err());
    }

    #[test]
    fn test_validate_course_pads() {
        assert_eq!(validate_course("7").unwrap(), "0007");
        assert_eq!(validate_course("0401").unwrap(), "0401");
        assert!(validate_course("12345").is_err());
        assert!(validate_course("04A1").is_err());
    }

    #[test]
    fn test_parse_days_times() {
        let (days, times) = parse_days_times("MoWeFr 10:00AM - 10:50AM");
        assert_eq!(
            days,
            Some(vec!["Mo".to_string(), "We".to_string(), "Fr".to_string()])
        );
        assert_eq!(times, Some(("10:00AM".to_string(), "10:50AM".to_string())));
        assert_eq!(parse_days_times("TBA"), (None, None));
        assert_eq!(parse_days_times("garbled"), (None, None));
    }
}
