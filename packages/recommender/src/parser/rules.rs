//! Per-locale extraction rule tables.
//!
//! The tables are data, not code branches: each locale carries a complete,
//! independent ordered rule list per field, so adding a locale (or a rule)
//! never touches the extraction algorithm in `parser::mod`.
//!
//! Ordering is significant. For enumerated fields (gender, education,
//! income) the groups are tried in declared order and the first group with
//! any matching rule wins; overlapping rules across groups (the Urdu
//! pronoun "وہ" appears in both gender lists) are resolved by that
//! declaration order.

use lazy_static::lazy_static;
use regex::Regex;

use crate::locale::Locale;
use crate::types::{EducationLevel, Gender, IncomeLevel};

/// A goal rule: the normalized topic token recorded on a match, plus the
/// pattern that detects it.
pub struct GoalRule {
    pub token: &'static str,
    pub pattern: Regex,
}

/// Complete rule tables for one locale.
pub struct RuleSet {
    /// Ordered age rules; first in-bounds capture wins
    pub age: Vec<Regex>,
    /// Gender groups in priority order
    pub gender: Vec<(Gender, Vec<Regex>)>,
    /// Education groups in priority order
    pub education: Vec<(EducationLevel, Vec<Regex>)>,
    /// Ordered location rules; first capture becomes the city
    pub location: Vec<Regex>,
    /// Goal rules, all tested independently
    pub goals: Vec<GoalRule>,
    /// Income groups in priority order
    pub income: Vec<(IncomeLevel, Vec<Regex>)>,
    /// Ordered occupation rules
    pub occupation: Vec<Regex>,
    /// Ordered family-size rules; first in-bounds capture wins
    pub family_size: Vec<Regex>,
    /// Disability indicators; any match records the single "disability" tag
    pub disabilities: Vec<Regex>,
}

/// Look up the rule tables for a locale.
pub fn rules_for(locale: Locale) -> &'static RuleSet {
    match locale {
        Locale::En => &EN_RULES,
        Locale::Ur => &UR_RULES,
    }
}

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

fn rx_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| rx(p)).collect()
}

fn goal(token: &'static str, pattern: &str) -> GoalRule {
    GoalRule {
        token,
        pattern: rx(pattern),
    }
}

lazy_static! {
    static ref EN_RULES: RuleSet = RuleSet {
        age: rx_all(&[
            r"(?i)(\d{1,2})\s*(?:years?\s*old|y\.?o\.?)",
            r"(?i)\bage\s*(?:is\s*)?(\d{1,2})",
            r"(?i)(\d{1,2})\s*years?",
        ]),
        gender: vec![
            (
                Gender::Male,
                rx_all(&[
                    r"(?i)\bmale\b",
                    r"(?i)\bman\b",
                    r"(?i)\bboy\b",
                    r"(?i)\bhe\b",
                    r"(?i)\bhis\b",
                ]),
            ),
            (
                Gender::Female,
                rx_all(&[
                    r"(?i)\bfemale\b",
                    r"(?i)\bwoman\b",
                    r"(?i)\bgirl\b",
                    r"(?i)\bshe\b",
                    r"(?i)\bher\b",
                ]),
            ),
            (
                Gender::Other,
                rx_all(&[r"(?i)\bnon-binary\b", r"(?i)\btransgender\b"]),
            ),
        ],
        education: vec![
            (
                EducationLevel::None,
                rx_all(&[
                    r"(?i)no\s*education",
                    r"(?i)\billiterate\b",
                    r"(?i)never\s*went\s*to\s*school",
                ]),
            ),
            (
                EducationLevel::Primary,
                rx_all(&[
                    r"(?i)\bprimary\b",
                    r"(?i)\belementary\b",
                    r"(?i)\bgrade\s*[1-5]\b",
                ]),
            ),
            (
                EducationLevel::Secondary,
                rx_all(&[
                    r"(?i)\bsecondary\b",
                    r"(?i)middle\s*school",
                    r"(?i)\bgrade\s*[6-8]\b",
                ]),
            ),
            (
                EducationLevel::HighSchool,
                rx_all(&[
                    r"(?i)high\s*school",
                    r"(?i)\bmatric",
                    r"(?i)\bgrade\s*(?:9|1[0-2])\b",
                ]),
            ),
            (
                EducationLevel::Bachelor,
                rx_all(&[
                    r"(?i)\bbachelor",
                    r"(?i)\bb\.?s\b",
                    r"(?i)\bb\.?a\b",
                    r"(?i)\bundergraduate\b",
                ]),
            ),
            (
                EducationLevel::Master,
                rx_all(&[
                    r"(?i)\bmaster",
                    r"(?i)\bm\.?s\b",
                    r"(?i)\bm\.?a\b",
                    r"(?i)\bgraduate\b",
                ]),
            ),
            (
                EducationLevel::Phd,
                rx_all(&[r"(?i)ph\.?\s*d", r"(?i)\bdoctorate\b", r"(?i)\bdoctor\b"]),
            ),
            (
                EducationLevel::Vocational,
                rx_all(&[
                    r"(?i)\bvocational\b",
                    r"(?i)\bdiploma\b",
                    r"(?i)\bcertificate\b",
                ]),
            ),
            (
                EducationLevel::Technical,
                rx_all(&[
                    r"(?i)\btechnical\b",
                    r"(?i)\bpolytechnic\b",
                    r"(?i)\bengineering\b",
                ]),
            ),
        ],
        location: rx_all(&[
            r"(?i)\b(?:from|live\s+in|located\s+in|in)\s+([A-Za-z][A-Za-z\s]*)",
            r"(?i)([A-Za-z][A-Za-z\s]*(?:city|province|state|country))",
        ]),
        goals: vec![
            goal("scholarship", r"(?i)\bscholarship"),
            goal("grant", r"(?i)\bgrant"),
            goal("loan", r"(?i)\bloan"),
            goal("education", r"(?i)\beducation"),
            goal("study", r"(?i)\bstudy"),
            goal("university", r"(?i)\buniversity"),
            goal("skill", r"(?i)\bskill"),
            goal("training", r"(?i)\btraining"),
            goal("job", r"(?i)\bjob"),
            goal("employment", r"(?i)\bemployment"),
            goal("business", r"(?i)\bbusiness"),
            goal("startup", r"(?i)\bstartup"),
            goal("housing", r"(?i)\bhousing"),
            goal("home", r"(?i)\bhome\b"),
            goal("medical", r"(?i)\bmedical"),
            goal("health", r"(?i)\bhealth"),
            goal("disability", r"(?i)\bdisabilit"),
        ],
        income: vec![
            (
                IncomeLevel::Low,
                rx_all(&[
                    r"(?i)low\s*income",
                    r"(?i)\bpoor\b",
                    r"(?i)\bstruggling",
                    r"(?i)minimum\s*wage",
                ]),
            ),
            (
                IncomeLevel::Medium,
                rx_all(&[
                    r"(?i)medium\s*income",
                    r"(?i)\baverage\b",
                    r"(?i)middle\s*class",
                ]),
            ),
            (
                IncomeLevel::High,
                rx_all(&[
                    r"(?i)high\s*income",
                    r"(?i)well\s*off",
                    r"(?i)\baffluent\b",
                ]),
            ),
            (
                IncomeLevel::VeryHigh,
                rx_all(&[
                    r"(?i)very\s*high\s*income",
                    r"(?i)\brich\b",
                    r"(?i)\bwealthy\b",
                ]),
            ),
        ],
        occupation: rx_all(&[
            r"(?i)\b(?:work\s+as|job\s+is|occupation\s+is)\s+(?:an?\s+)?([A-Za-z][A-Za-z\s]*)",
            r"(?i)\b(?:am\s+an?|is\s+an?)\s+([A-Za-z][A-Za-z\s]*)",
        ]),
        family_size: rx_all(&[
            r"(?i)(\d{1,2})\s*(?:family\s*members?|people\s*in\s*family|children)",
            r"(?i)family\s*of\s*(\d{1,2})",
        ]),
        disabilities: rx_all(&[
            r"(?i)\bdisabilit",
            r"(?i)\bdisabled\b",
            r"(?i)\bwheelchair\b",
            r"(?i)\bblind\b",
            r"(?i)\bdeaf\b",
            r"(?i)\bmobility\b",
        ]),
    };

    static ref UR_RULES: RuleSet = RuleSet {
        age: rx_all(&[
            r"(\d{1,2})\s*(?:سال|سالہ)",
            r"عمر\s*(?:ہے\s*)?(\d{1,2})",
        ]),
        gender: vec![
            (
                Gender::Male,
                rx_all(&[r"مرد", r"لڑکا", r"وہ", r"اس\s*کا"]),
            ),
            (
                Gender::Female,
                rx_all(&[r"عورت", r"لڑکی", r"وہ", r"اس\s*کی"]),
            ),
            (Gender::Other, rx_all(&[r"دیگر", r"غیر\s*ثنائی"])),
        ],
        education: vec![
            (
                EducationLevel::None,
                rx_all(&[r"کوئی\s*تعلیم\s*نہیں", r"ان\s*پڑھ"]),
            ),
            (
                EducationLevel::Primary,
                rx_all(&[r"پرائمری", r"ابتدائی", r"کلاس\s*[1-5]"]),
            ),
            (
                EducationLevel::Secondary,
                rx_all(&[r"ثانوی", r"مڈل", r"کلاس\s*[6-8]"]),
            ),
            (
                EducationLevel::HighSchool,
                rx_all(&[r"ہائی\s*اسکول", r"میٹرک", r"کلاس\s*(?:9|1[0-2])"]),
            ),
            (
                EducationLevel::Bachelor,
                rx_all(&[r"بیچلر", r"انڈرگریجویٹ", r"گریجویٹ"]),
            ),
            (
                EducationLevel::Master,
                rx_all(&[r"ماسٹر", r"پوسٹ\s*گریجویٹ"]),
            ),
            (
                EducationLevel::Phd,
                rx_all(&[r"پی\s*ایچ\s*ڈی", r"ڈاکٹریٹ"]),
            ),
            (
                EducationLevel::Vocational,
                rx_all(&[r"ووکیشنل", r"ڈپلومہ", r"سرٹیفکیٹ"]),
            ),
            (
                EducationLevel::Technical,
                rx_all(&[r"ٹیکنیکل", r"انجینئرنگ"]),
            ),
        ],
        location: rx_all(&[
            r"(?:رہتا\s*ہوں|رہتی\s*ہوں|سے|میں)\s*([\u{0600}-\u{06FF}][\u{0600}-\u{06FF}\s]*)",
            r"([\u{0600}-\u{06FF}][\u{0600}-\u{06FF}\s]*(?:شہر|صوبہ|ملک))",
        ]),
        goals: vec![
            goal("وظیفہ", r"وظیفہ"),
            goal("گرانٹ", r"گرانٹ"),
            goal("قرضہ", r"قرضہ"),
            goal("تعلیم", r"تعلیم"),
            goal("پڑھائی", r"پڑھائی"),
            goal("یونیورسٹی", r"یونیورسٹی"),
            goal("ہنر", r"ہنر"),
            goal("تربیت", r"تربیت"),
            goal("ملازمت", r"ملازمت"),
            goal("کاروبار", r"کاروبار"),
            goal("گھر", r"گھر"),
            goal("صحت", r"صحت"),
            goal("معذوری", r"معذوری"),
        ],
        income: vec![
            (
                IncomeLevel::Low,
                rx_all(&[r"کم\s*آمدنی", r"غریب", r"مفلس"]),
            ),
            (
                IncomeLevel::Medium,
                rx_all(&[r"درمیانی\s*آمدنی", r"اوسط"]),
            ),
            (
                IncomeLevel::High,
                rx_all(&[r"زیادہ\s*آمدنی", r"امیر"]),
            ),
            (
                IncomeLevel::VeryHigh,
                rx_all(&[r"بہت\s*زیادہ\s*آمدنی", r"مالدار"]),
            ),
        ],
        occupation: rx_all(&[
            r"(?:کام\s*کرتا\s*ہوں|کام\s*کرتی\s*ہوں|ملازمت\s*ہے)\s*([\u{0600}-\u{06FF}][\u{0600}-\u{06FF}\s]*)",
        ]),
        family_size: rx_all(&[
            r"(\d{1,2})\s*(?:خاندان|افراد|بچے)",
            r"خاندان\s*میں\s*(\d{1,2})",
        ]),
        disabilities: rx_all(&[
            r"معذوری",
            r"معذور",
            r"اندھا",
            r"بہرا",
            r"چلنے\s*میں\s*مشکل",
        ]),
    };
}
