use std::collections::HashMap;
use std::sync::LazyLock;

/// Sentinel for unknown or absent region/country names.
pub const UNKNOWN_CODE: &str = "XX";

static STATE_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("TAMIL NADU", "TN"),
        ("KERALA", "KL"),
        ("KARNATAKA", "KA"),
        ("ANDHRA PRADESH", "AP"),
        ("TELANGANA", "TG"),
        ("MAHARASHTRA", "MH"),
        ("GUJARAT", "GJ"),
        ("RAJASTHAN", "RJ"),
        ("MADHYA PRADESH", "MP"),
        ("UTTAR PRADESH", "UP"),
        ("BIHAR", "BR"),
        ("WEST BENGAL", "WB"),
        ("ODISHA", "OR"),
        ("ASSAM", "AS"),
        ("PUNJAB", "PB"),
        ("HARYANA", "HR"),
        ("HIMACHAL PRADESH", "HP"),
        ("UTTARAKHAND", "UK"),
        ("JAMMU AND KASHMIR", "JK"),
        ("DELHI", "DL"),
        ("CHANDIGARH", "CH"),
        ("PUDUCHERRY", "PY"),
        ("GOA", "GA"),
        ("MEGHALAYA", "ML"),
        ("MANIPUR", "MN"),
        ("MIZORAM", "MZ"),
        ("NAGALAND", "NL"),
        ("TRIPURA", "TR"),
        ("SIKKIM", "SK"),
        ("ARUNACHAL PRADESH", "AR"),
        ("LADAKH", "LA"),
        ("ANDAMAN AND NICOBAR ISLANDS", "AN"),
        ("DAMAN AND DIU", "DD"),
        ("DADRA AND NAGAR HAVELI", "DN"),
        ("LAKSHADWEEP", "LD"),
    ])
});

static COUNTRY_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("INDIA", "IN"),
        ("UNITED STATES", "US"),
        ("UNITED KINGDOM", "UK"),
        ("CANADA", "CA"),
        ("AUSTRALIA", "AU"),
        ("GERMANY", "DE"),
        ("FRANCE", "FR"),
        ("JAPAN", "JP"),
        ("CHINA", "CN"),
        ("BRAZIL", "BR"),
        ("RUSSIA", "RU"),
        ("SOUTH AFRICA", "ZA"),
        ("MEXICO", "MX"),
        ("ITALY", "IT"),
        ("SPAIN", "ES"),
        ("NETHERLANDS", "NL"),
        ("BELGIUM", "BE"),
        ("SWITZERLAND", "CH"),
        ("AUSTRIA", "AT"),
        ("SWEDEN", "SE"),
        ("NORWAY", "NO"),
        ("DENMARK", "DK"),
        ("FINLAND", "FI"),
        ("POLAND", "PL"),
        ("CZECH REPUBLIC", "CZ"),
        ("HUNGARY", "HU"),
        ("ROMANIA", "RO"),
        ("BULGARIA", "BG"),
        ("CROATIA", "HR"),
        ("SLOVENIA", "SI"),
        ("SLOVAKIA", "SK"),
        ("ESTONIA", "EE"),
        ("LATVIA", "LV"),
        ("LITHUANIA", "LT"),
        ("MALTA", "MT"),
        ("CYPRUS", "CY"),
        ("IRELAND", "IE"),
        ("PORTUGAL", "PT"),
        ("GREECE", "GR"),
        ("TURKEY", "TR"),
        ("ISRAEL", "IL"),
        ("SAUDI ARABIA", "SA"),
        ("UNITED ARAB EMIRATES", "AE"),
        ("QATAR", "QA"),
        ("KUWAIT", "KW"),
        ("BAHRAIN", "BH"),
        ("OMAN", "OM"),
        ("JORDAN", "JO"),
        ("LEBANON", "LB"),
        ("SYRIA", "SY"),
        ("IRAQ", "IQ"),
        ("IRAN", "IR"),
        ("AFGHANISTAN", "AF"),
        ("PAKISTAN", "PK"),
        ("BANGLADESH", "BD"),
        ("SRI LANKA", "LK"),
        ("NEPAL", "NP"),
        ("BHUTAN", "BT"),
        ("MALDIVES", "MV"),
        ("MYANMAR", "MM"),
        ("THAILAND", "TH"),
        ("LAOS", "LA"),
        ("CAMBODIA", "KH"),
        ("VIETNAM", "VN"),
        ("MALAYSIA", "MY"),
        ("SINGAPORE", "SG"),
        ("INDONESIA", "ID"),
        ("PHILIPPINES", "PH"),
        ("BRUNEI", "BN"),
        ("EAST TIMOR", "TL"),
        ("PAPUA NEW GUINEA", "PG"),
        ("FIJI", "FJ"),
        ("SOLOMON ISLANDS", "SB"),
        ("VANUATU", "VU"),
        ("NEW CALEDONIA", "NC"),
        ("NEW ZEALAND", "NZ"),
        ("SAMOA", "WS"),
        ("TONGA", "TO"),
        ("KIRIBATI", "KI"),
        ("TUVALU", "TV"),
        ("NAURU", "NR"),
        ("PALAU", "PW"),
        ("MARSHALL ISLANDS", "MH"),
        ("MICRONESIA", "FM"),
        ("COOK ISLANDS", "CK"),
        ("NIUE", "NU"),
        ("TOKELAU", "TK"),
        ("AMERICAN SAMOA", "AS"),
        ("GUAM", "GU"),
        ("NORTHERN MARIANA ISLANDS", "MP"),
        ("PUERTO RICO", "PR"),
        ("VIRGIN ISLANDS", "VI"),
        ("ANGUILLA", "AI"),
        ("ANTIGUA AND BARBUDA", "AG"),
        ("ARUBA", "AW"),
        ("BAHAMAS", "BS"),
        ("BARBADOS", "BB"),
        ("BELIZE", "BZ"),
        ("BERMUDA", "BM"),
        ("BONAIRE", "BQ"),
        ("BRITISH VIRGIN ISLANDS", "VG"),
        ("CAYMAN ISLANDS", "KY"),
        ("COSTA RICA", "CR"),
        ("CUBA", "CU"),
        ("CURACAO", "CW"),
        ("DOMINICA", "DM"),
        ("DOMINICAN REPUBLIC", "DO"),
        ("EL SALVADOR", "SV"),
        ("GRENADA", "GD"),
        ("GUATEMALA", "GT"),
        ("HAITI", "HT"),
        ("HONDURAS", "HN"),
        ("JAMAICA", "JM"),
        ("MARTINIQUE", "MQ"),
        ("MONTSERRAT", "MS"),
        ("NICARAGUA", "NI"),
        ("PANAMA", "PA"),
        ("SABA", "BQ"),
        ("SAINT BARTHELEMY", "BL"),
        ("SAINT KITTS AND NEVIS", "KN"),
        ("SAINT LUCIA", "LC"),
        ("SAINT MARTIN", "MF"),
        ("SAINT PIERRE AND MIQUELON", "PM"),
        ("SAINT VINCENT AND THE GRENADINES", "VC"),
        ("SINT EUSTATIUS", "BQ"),
        ("SINT MAARTEN", "SX"),
        ("TRINIDAD AND TOBAGO", "TT"),
        ("TURKS AND CAICOS ISLANDS", "TC"),
        ("US VIRGIN ISLANDS", "VI"),
    ])
});

/// Case-insensitive state/UT name to 2-letter code; unknown or absent input
/// maps to the `XX` sentinel.
pub fn state_code(state_name: Option<&str>) -> &'static str {
    lookup(&STATE_CODES, state_name)
}

/// Case-insensitive country name to 2-letter code; unknown or absent input
/// maps to the `XX` sentinel.
pub fn country_code(country_name: Option<&str>) -> &'static str {
    lookup(&COUNTRY_CODES, country_name)
}

fn lookup(table: &HashMap<&'static str, &'static str>, name: Option<&str>) -> &'static str {
    match name {
        Some(n) if !n.trim().is_empty() => table
            .get(n.trim().to_uppercase().as_str())
            .copied()
            .unwrap_or(UNKNOWN_CODE),
        _ => UNKNOWN_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_state_maps_to_code() {
        assert_eq!(state_code(Some("Tamil Nadu")), "TN");
        assert_eq!(state_code(Some("KERALA")), "KL");
        assert_eq!(state_code(Some("  punjab  ")), "PB");
    }

    #[test]
    fn unknown_or_absent_state_maps_to_sentinel() {
        assert_eq!(state_code(Some("Atlantis")), "XX");
        assert_eq!(state_code(Some("")), "XX");
        assert_eq!(state_code(None), "XX");
    }

    #[test]
    fn country_lookup_is_case_insensitive() {
        assert_eq!(country_code(Some("india")), "IN");
        assert_eq!(country_code(Some("United States")), "US");
        assert_eq!(country_code(None), "XX");
        assert_eq!(country_code(Some("Middle Earth")), "XX");
    }
}
