//! Static per-country data
//!
//! Loaded once at process start and never mutated. The table carries the
//! supported payout currencies and, for countries where Stripe collects
//! `address.state`, the administrative-division list used to validate
//! posted state codes.
//!
//! This data is advisory: it drives the UI before the first upstream
//! round-trip. The authoritative requirement signal is always the
//! connected account's `currently_due` array.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// An administrative division (state, province, prefecture, canton)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Division {
    pub code: &'static str,
    pub name: &'static str,
}

/// Immutable per-country record
#[derive(Debug, Clone, Copy)]
pub struct CountrySpec {
    /// ISO 3166-1 alpha-2 code
    pub code: &'static str,
    pub name: &'static str,
    /// Currency new external bank accounts default to
    pub default_currency: &'static str,
    /// Currencies accepted for external bank accounts
    pub currencies: &'static [&'static str],
    /// Division list; empty when Stripe never collects a state here
    pub divisions: &'static [Division],
}

macro_rules! divisions {
    ($(($code:literal, $name:literal)),* $(,)?) => {
        &[$(Division { code: $code, name: $name }),*]
    };
}

const AT_DIVISIONS: &[Division] = divisions![
    ("1", "Burgenland"),
    ("2", "Kärnten"),
    ("3", "Niederösterreich"),
    ("4", "Oberösterreich"),
    ("5", "Salzburg"),
    ("6", "Steiermark"),
    ("7", "Tirol"),
    ("8", "Vorarlberg"),
    ("9", "Wien"),
];

const AU_DIVISIONS: &[Division] = divisions![
    ("ACT", "Australian Capital Territory"),
    ("NSW", "New South Wales"),
    ("NT", "Northern Territory"),
    ("QLD", "Queensland"),
    ("SA", "South Australia"),
    ("TAS", "Tasmania"),
    ("VIC", "Victoria"),
    ("WA", "Western Australia"),
];

const CA_DIVISIONS: &[Division] = divisions![
    ("AB", "Alberta"),
    ("BC", "British Columbia"),
    ("MB", "Manitoba"),
    ("NB", "New Brunswick"),
    ("NL", "Newfoundland and Labrador"),
    ("NS", "Nova Scotia"),
    ("NT", "Northwest Territories"),
    ("NU", "Nunavut"),
    ("ON", "Ontario"),
    ("PE", "Prince Edward Island"),
    ("QC", "Quebec"),
    ("SK", "Saskatchewan"),
    ("YT", "Yukon"),
];

const CH_DIVISIONS: &[Division] = divisions![
    ("AG", "Aargau"),
    ("AI", "Appenzell Innerrhoden"),
    ("AR", "Appenzell Ausserrhoden"),
    ("BE", "Bern"),
    ("BL", "Basel-Landschaft"),
    ("BS", "Basel-Stadt"),
    ("FR", "Fribourg"),
    ("GE", "Genève"),
    ("GL", "Glarus"),
    ("GR", "Graubünden"),
    ("JU", "Jura"),
    ("LU", "Luzern"),
    ("NE", "Neuchâtel"),
    ("NW", "Nidwalden"),
    ("OW", "Obwalden"),
    ("SG", "St. Gallen"),
    ("SH", "Schaffhausen"),
    ("SO", "Solothurn"),
    ("SZ", "Schwyz"),
    ("TG", "Thurgau"),
    ("TI", "Ticino"),
    ("UR", "Uri"),
    ("VD", "Vaud"),
    ("VS", "Valais"),
    ("ZG", "Zug"),
    ("ZH", "Zürich"),
];

const DE_DIVISIONS: &[Division] = divisions![
    ("BW", "Baden-Württemberg"),
    ("BY", "Bayern"),
    ("BE", "Berlin"),
    ("BB", "Brandenburg"),
    ("HB", "Bremen"),
    ("HH", "Hamburg"),
    ("HE", "Hessen"),
    ("MV", "Mecklenburg-Vorpommern"),
    ("NI", "Niedersachsen"),
    ("NW", "Nordrhein-Westfalen"),
    ("RP", "Rheinland-Pfalz"),
    ("SL", "Saarland"),
    ("SN", "Sachsen"),
    ("ST", "Sachsen-Anhalt"),
    ("SH", "Schleswig-Holstein"),
    ("TH", "Thüringen"),
];

const ES_DIVISIONS: &[Division] = divisions![
    ("AN", "Andalucía"),
    ("AR", "Aragón"),
    ("AS", "Asturias"),
    ("CB", "Cantabria"),
    ("CE", "Ceuta"),
    ("CL", "Castilla y León"),
    ("CM", "Castilla-La Mancha"),
    ("CN", "Canarias"),
    ("CT", "Catalunya"),
    ("EX", "Extremadura"),
    ("GA", "Galicia"),
    ("IB", "Illes Balears"),
    ("MC", "Murcia"),
    ("MD", "Madrid"),
    ("ML", "Melilla"),
    ("NC", "Navarra"),
    ("PV", "País Vasco"),
    ("RI", "La Rioja"),
    ("VC", "Valenciana"),
];

const IE_DIVISIONS: &[Division] = divisions![
    ("C", "Cork"),
    ("CE", "Clare"),
    ("CN", "Cavan"),
    ("CW", "Carlow"),
    ("D", "Dublin"),
    ("DL", "Donegal"),
    ("G", "Galway"),
    ("KE", "Kildare"),
    ("KK", "Kilkenny"),
    ("KY", "Kerry"),
    ("LD", "Longford"),
    ("LH", "Louth"),
    ("LK", "Limerick"),
    ("LM", "Leitrim"),
    ("LS", "Laois"),
    ("MH", "Meath"),
    ("MN", "Monaghan"),
    ("MO", "Mayo"),
    ("OY", "Offaly"),
    ("RN", "Roscommon"),
    ("SO", "Sligo"),
    ("TA", "Tipperary"),
    ("WD", "Waterford"),
    ("WH", "Westmeath"),
    ("WW", "Wicklow"),
    ("WX", "Wexford"),
];

const IT_DIVISIONS: &[Division] = divisions![
    ("21", "Piemonte"),
    ("23", "Valle d'Aosta"),
    ("25", "Lombardia"),
    ("32", "Trentino-Alto Adige"),
    ("34", "Veneto"),
    ("36", "Friuli-Venezia Giulia"),
    ("42", "Liguria"),
    ("45", "Emilia-Romagna"),
    ("52", "Toscana"),
    ("55", "Umbria"),
    ("57", "Marche"),
    ("62", "Lazio"),
    ("65", "Abruzzo"),
    ("67", "Molise"),
    ("72", "Campania"),
    ("75", "Puglia"),
    ("77", "Basilicata"),
    ("78", "Calabria"),
    ("82", "Sicilia"),
    ("88", "Sardegna"),
];

const JP_DIVISIONS: &[Division] = divisions![
    ("01", "Hokkaido"),
    ("02", "Aomori"),
    ("03", "Iwate"),
    ("04", "Miyagi"),
    ("05", "Akita"),
    ("06", "Yamagata"),
    ("07", "Fukushima"),
    ("08", "Ibaraki"),
    ("09", "Tochigi"),
    ("10", "Gunma"),
    ("11", "Saitama"),
    ("12", "Chiba"),
    ("13", "Tokyo"),
    ("14", "Kanagawa"),
    ("15", "Niigata"),
    ("16", "Toyama"),
    ("17", "Ishikawa"),
    ("18", "Fukui"),
    ("19", "Yamanashi"),
    ("20", "Nagano"),
    ("21", "Gifu"),
    ("22", "Shizuoka"),
    ("23", "Aichi"),
    ("24", "Mie"),
    ("25", "Shiga"),
    ("26", "Kyoto"),
    ("27", "Osaka"),
    ("28", "Hyogo"),
    ("29", "Nara"),
    ("30", "Wakayama"),
    ("31", "Tottori"),
    ("32", "Shimane"),
    ("33", "Okayama"),
    ("34", "Hiroshima"),
    ("35", "Yamaguchi"),
    ("36", "Tokushima"),
    ("37", "Kagawa"),
    ("38", "Ehime"),
    ("39", "Kochi"),
    ("40", "Fukuoka"),
    ("41", "Saga"),
    ("42", "Nagasaki"),
    ("43", "Kumamoto"),
    ("44", "Oita"),
    ("45", "Miyazaki"),
    ("46", "Kagoshima"),
    ("47", "Okinawa"),
];

const MY_DIVISIONS: &[Division] = divisions![
    ("JHR", "Johor"),
    ("KDH", "Kedah"),
    ("KTN", "Kelantan"),
    ("KUL", "Kuala Lumpur"),
    ("LBN", "Labuan"),
    ("MLK", "Melaka"),
    ("NSN", "Negeri Sembilan"),
    ("PHG", "Pahang"),
    ("PJY", "Putrajaya"),
    ("PLS", "Perlis"),
    ("PNG", "Pulau Pinang"),
    ("PRK", "Perak"),
    ("SBH", "Sabah"),
    ("SGR", "Selangor"),
    ("SWK", "Sarawak"),
    ("TRG", "Terengganu"),
];

const NZ_DIVISIONS: &[Division] = divisions![
    ("AUK", "Auckland"),
    ("BOP", "Bay of Plenty"),
    ("CAN", "Canterbury"),
    ("GIS", "Gisborne"),
    ("HKB", "Hawke's Bay"),
    ("MBH", "Marlborough"),
    ("MWT", "Manawatu-Wanganui"),
    ("NSN", "Nelson"),
    ("NTL", "Northland"),
    ("OTA", "Otago"),
    ("STL", "Southland"),
    ("TAS", "Tasman"),
    ("TKI", "Taranaki"),
    ("WGN", "Wellington"),
    ("WKO", "Waikato"),
    ("WTC", "West Coast"),
];

const US_DIVISIONS: &[Division] = divisions![
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

const COUNTRIES: &[CountrySpec] = &[
    CountrySpec { code: "AT", name: "Austria", default_currency: "eur", currencies: &["eur"], divisions: AT_DIVISIONS },
    CountrySpec { code: "AU", name: "Australia", default_currency: "aud", currencies: &["aud"], divisions: AU_DIVISIONS },
    CountrySpec { code: "BE", name: "Belgium", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "CA", name: "Canada", default_currency: "cad", currencies: &["cad", "usd"], divisions: CA_DIVISIONS },
    CountrySpec { code: "CH", name: "Switzerland", default_currency: "chf", currencies: &["chf", "eur"], divisions: CH_DIVISIONS },
    CountrySpec { code: "DE", name: "Germany", default_currency: "eur", currencies: &["eur"], divisions: DE_DIVISIONS },
    CountrySpec { code: "DK", name: "Denmark", default_currency: "dkk", currencies: &["dkk", "eur"], divisions: &[] },
    CountrySpec { code: "EE", name: "Estonia", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "ES", name: "Spain", default_currency: "eur", currencies: &["eur"], divisions: ES_DIVISIONS },
    CountrySpec { code: "FI", name: "Finland", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "FR", name: "France", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "GB", name: "United Kingdom", default_currency: "gbp", currencies: &["gbp", "eur", "usd"], divisions: &[] },
    CountrySpec { code: "HK", name: "Hong Kong", default_currency: "hkd", currencies: &["hkd"], divisions: &[] },
    CountrySpec { code: "IE", name: "Ireland", default_currency: "eur", currencies: &["eur"], divisions: IE_DIVISIONS },
    CountrySpec { code: "IT", name: "Italy", default_currency: "eur", currencies: &["eur"], divisions: IT_DIVISIONS },
    CountrySpec { code: "JP", name: "Japan", default_currency: "jpy", currencies: &["jpy"], divisions: JP_DIVISIONS },
    CountrySpec { code: "LT", name: "Lithuania", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "LU", name: "Luxembourg", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "LV", name: "Latvia", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "MY", name: "Malaysia", default_currency: "myr", currencies: &["myr"], divisions: MY_DIVISIONS },
    CountrySpec { code: "NL", name: "Netherlands", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "NO", name: "Norway", default_currency: "nok", currencies: &["nok"], divisions: &[] },
    CountrySpec { code: "NZ", name: "New Zealand", default_currency: "nzd", currencies: &["nzd"], divisions: NZ_DIVISIONS },
    CountrySpec { code: "PT", name: "Portugal", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "SE", name: "Sweden", default_currency: "sek", currencies: &["sek", "eur"], divisions: &[] },
    CountrySpec { code: "SG", name: "Singapore", default_currency: "sgd", currencies: &["sgd"], divisions: &[] },
    CountrySpec { code: "SI", name: "Slovenia", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "SK", name: "Slovakia", default_currency: "eur", currencies: &["eur"], divisions: &[] },
    CountrySpec { code: "US", name: "United States", default_currency: "usd", currencies: &["usd"], divisions: US_DIVISIONS },
];

static INDEX: Lazy<BTreeMap<&'static str, &'static CountrySpec>> =
    Lazy::new(|| COUNTRIES.iter().map(|c| (c.code, c)).collect());

/// Looks up a country by ISO code
pub fn country(code: &str) -> Option<&'static CountrySpec> {
    INDEX.get(code).copied()
}

/// True if onboarding supports the country
pub fn is_supported(code: &str) -> bool {
    INDEX.contains_key(code)
}

/// Looks up an administrative division within a country
pub fn division(country_code: &str, division_code: &str) -> Option<&'static Division> {
    country(country_code)?
        .divisions
        .iter()
        .find(|d| d.code == division_code)
}

/// All supported country codes, sorted
pub fn supported_countries() -> impl Iterator<Item = &'static CountrySpec> {
    COUNTRIES.iter()
}
