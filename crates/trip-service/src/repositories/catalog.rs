//! Static destination catalog.
//!
//! Korean provinces and a selection of cities per province. The catalog is
//! compile-time data; lookups are case-insensitive on the province name.

/// Province name paired with its selectable cities.
type ProvinceEntry = (&'static str, &'static [&'static str]);

static CATALOG: &[ProvinceEntry] = &[
    ("Seoul", &["Jongno", "Gangnam", "Mapo", "Yongsan"]),
    ("Busan", &["Haeundae", "Seomyeon", "Gwangalli", "Gijang"]),
    ("Incheon", &["Songdo", "Ganghwa", "Wolmido"]),
    ("Daegu", &["Jung-gu", "Suseong", "Dalseong"]),
    ("Daejeon", &["Yuseong", "Jung-gu"]),
    ("Gwangju", &["Dong-gu", "Chungjang"]),
    ("Ulsan", &["Ilsan Beach", "Taehwagang"]),
    ("Gyeonggi", &["Suwon", "Paju", "Gapyeong", "Yongin"]),
    ("Gangwon", &["Gangneung", "Sokcho", "Chuncheon", "Pyeongchang"]),
    ("Chungbuk", &["Cheongju", "Danyang"]),
    ("Chungnam", &["Gongju", "Boryeong", "Taean"]),
    ("Jeonbuk", &["Jeonju", "Gunsan", "Namwon"]),
    ("Jeonnam", &["Yeosu", "Suncheon", "Mokpo", "Damyang"]),
    ("Gyeongbuk", &["Gyeongju", "Andong", "Pohang"]),
    ("Gyeongnam", &["Tongyeong", "Geoje", "Jinju", "Namhae"]),
    ("Jeju", &["Jeju City", "Seogwipo", "Aewol", "Seongsan"]),
];

/// All province names, in catalog order.
#[must_use]
pub fn provinces() -> Vec<&'static str> {
    CATALOG.iter().map(|(province, _)| *province).collect()
}

/// Cities of a province, or `None` for an unknown province.
#[must_use]
pub fn cities(province: &str) -> Option<&'static [&'static str]> {
    CATALOG
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(province))
        .map(|(_, cities)| *cities)
}

/// Whether the province/city pair exists in the catalog.
#[must_use]
pub fn contains(province: &str, city: &str) -> bool {
    cities(province)
        .is_some_and(|cities| cities.iter().any(|c| c.eq_ignore_ascii_case(city)))
}
