//! Well-known Chinese font families and the names people know them by.
//!
//! Nothing in the layout pipeline depends on this list; it exists so a front
//! end can offer a sensible choice of families.

/// (family, display name) pairs, roughly grouped by style: kai, song, hei,
/// fangsong, then decorative faces
pub const FONT_CATALOG: [(&str, &str); 35] = [
    ("STKaiti", "华文楷体"),
    ("BiauKai", "标楷体"),
    ("Kai", "楷体"),
    ("KaiTi", "楷体"),
    ("DFKai-SB", "华康标楷"),
    ("STSong", "华文宋体"),
    ("Songti SC", "宋体简体"),
    ("Song", "宋体"),
    ("SimSun", "宋体"),
    ("NSimSun", "新宋体"),
    ("LiSong Pro", "俪宋"),
    ("PMingLiU", "细明体"),
    ("PingFang SC", "平方简体"),
    ("Hei", "黑体"),
    ("STHeiti", "华文黑体"),
    ("Heiti SC", "黑体简体"),
    ("LiHei Pro", "俪黑"),
    ("Microsoft JhengHei", "微软正黑"),
    ("Microsoft YaHei", "微软雅黑"),
    ("SimHei", "新黑体"),
    ("Noto Sans CJK SC", "Noto黑体简"),
    ("STXihei", "华文细黑"),
    ("FangSong", "仿宋"),
    ("Fang Song", "仿宋"),
    ("STFangSong", "华文仿宋"),
    ("Yuanti SC", "圆体简体"),
    ("Xingkai SC", "行楷简体"),
    ("STXingkai", "华文行楷"),
    ("LiSu", "隶书"),
    ("STLiti", "华文隶书"),
    ("YouYuan", "幼圆"),
    ("Weibei SC", "魏碑简体"),
    ("STXinwei", "华文新魏"),
    ("Yuppy SC", "雅痞简体"),
    ("Wawati SC", "娃娃体简体"),
];

/// Display name of a catalogued family, matched ignoring case
pub fn display_name(family: &str) -> Option<&'static str> {
    let family = family.trim();
    FONT_CATALOG
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(family))
        .map(|&(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_display_names() {
        assert_eq!(display_name("KaiTi"), Some("楷体"));
        assert_eq!(display_name("microsoft yahei"), Some("微软雅黑"));
        assert_eq!(display_name("Comic Sans"), None);
    }

    #[test]
    fn families_are_unique() {
        let mut families: Vec<&str> = FONT_CATALOG.iter().map(|(family, _)| *family).collect();
        families.sort_unstable();
        families.dedup();
        assert_eq!(families.len(), FONT_CATALOG.len());
    }
}
