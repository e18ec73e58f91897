//! Locale tags and their translation tables.
//!
//! Tables are static data compiled into the crate; nothing is loaded at
//! runtime. Weekday arrays are indexed from Sunday (0) to Saturday (6).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TemporaError;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ja,
    #[default]
    En,
    Fr,
    De,
    Zh,
    Ko,
    Es,
    Pt,
}

/// Relative-time templates. `{value}` is replaced by the rendered amount.
#[derive(Debug)]
pub struct RelativeTable {
    pub future: &'static str,
    pub past: &'static str,
    pub few_seconds: &'static str,
    pub minute: &'static str,
    pub minutes: &'static str,
    pub hour: &'static str,
    pub hours: &'static str,
    pub day: &'static str,
    pub days: &'static str,
    pub month: &'static str,
    pub months: &'static str,
    pub year: &'static str,
    pub years: &'static str,
}

/// Everything a locale needs for presentation.
#[derive(Debug)]
pub struct Translation {
    pub months_long: [&'static str; 12],
    pub months_short: [&'static str; 12],
    pub days_long: [&'static str; 7],
    pub days_short: [&'static str; 7],
    pub relative: RelativeTable,
}

impl Locale {
    pub const ALL: [Locale; 8] = [
        Locale::Ja,
        Locale::En,
        Locale::Fr,
        Locale::De,
        Locale::Zh,
        Locale::Ko,
        Locale::Es,
        Locale::Pt,
    ];

    /// The two-letter tag, e.g. `"en"`.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Ja => "ja",
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Zh => "zh",
            Locale::Ko => "ko",
            Locale::Es => "es",
            Locale::Pt => "pt",
        }
    }

    pub fn translation(self) -> &'static Translation {
        match self {
            Locale::Ja => &JA,
            Locale::En => &EN,
            Locale::Fr => &FR,
            Locale::De => &DE,
            Locale::Zh => &ZH,
            Locale::Ko => &KO,
            Locale::Es => &ES,
            Locale::Pt => &PT,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = TemporaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.tag() == tag)
            .ok_or_else(|| TemporaError::UnsupportedLocale(format!("'{}'", s.trim())))
    }
}

impl RelativeTable {
    /// Render `count` of a unit, choosing the singular form when `count == 1`.
    pub(crate) fn amount(&self, singular: &str, plural: &str, count: i64) -> String {
        if count == 1 {
            singular.to_string()
        } else {
            plural.replace("{value}", &count.to_string())
        }
    }

    pub(crate) fn wrap(&self, value: &str, past: bool) -> String {
        let template = if past { self.past } else { self.future };
        template.replace("{value}", value)
    }
}

// ── Tables ──────────────────────────────────────────────────────────────────

static JA: Translation = Translation {
    months_long: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    months_short: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    days_long: ["日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日"],
    days_short: ["日", "月", "火", "水", "木", "金", "土"],
    relative: RelativeTable {
        future: "{value}後",
        past: "{value}前",
        few_seconds: "数秒",
        minute: "1分",
        minutes: "{value}分",
        hour: "1時間",
        hours: "{value}時間",
        day: "1日",
        days: "{value}日",
        month: "1ヶ月",
        months: "{value}ヶ月",
        year: "1年",
        years: "{value}年",
    },
};

static EN: Translation = Translation {
    months_long: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    days_long: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    days_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    relative: RelativeTable {
        future: "in {value}",
        past: "{value} ago",
        few_seconds: "a few seconds",
        minute: "a minute",
        minutes: "{value} minutes",
        hour: "an hour",
        hours: "{value} hours",
        day: "a day",
        days: "{value} days",
        month: "a month",
        months: "{value} months",
        year: "a year",
        years: "{value} years",
    },
};

static FR: Translation = Translation {
    months_long: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    days_long: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    days_short: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    relative: RelativeTable {
        future: "dans {value}",
        past: "il y a {value}",
        few_seconds: "quelques secondes",
        minute: "une minute",
        minutes: "{value} minutes",
        hour: "une heure",
        hours: "{value} heures",
        day: "un jour",
        days: "{value} jours",
        month: "un mois",
        months: "{value} mois",
        year: "un an",
        years: "{value} ans",
    },
};

static DE: Translation = Translation {
    months_long: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    days_long: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    days_short: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    relative: RelativeTable {
        future: "in {value}",
        past: "vor {value}",
        few_seconds: "einigen Sekunden",
        minute: "einer Minute",
        minutes: "{value} Minuten",
        hour: "einer Stunde",
        hours: "{value} Stunden",
        day: "einem Tag",
        days: "{value} Tagen",
        month: "einem Monat",
        months: "{value} Monaten",
        year: "einem Jahr",
        years: "{value} Jahren",
    },
};

static ZH: Translation = Translation {
    months_long: [
        "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
        "十二月",
    ],
    months_short: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    days_long: [
        "星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六",
    ],
    days_short: ["周日", "周一", "周二", "周三", "周四", "周五", "周六"],
    relative: RelativeTable {
        future: "{value}后",
        past: "{value}前",
        few_seconds: "几秒",
        minute: "1分钟",
        minutes: "{value}分钟",
        hour: "1小时",
        hours: "{value}小时",
        day: "1天",
        days: "{value}天",
        month: "1个月",
        months: "{value}个月",
        year: "1年",
        years: "{value}年",
    },
};

static KO: Translation = Translation {
    months_long: [
        "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
    ],
    months_short: [
        "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
    ],
    days_long: [
        "일요일", "월요일", "화요일", "수요일", "목요일", "금요일", "토요일",
    ],
    days_short: ["일", "월", "화", "수", "목", "금", "토"],
    relative: RelativeTable {
        future: "{value} 후",
        past: "{value} 전",
        few_seconds: "몇 초",
        minute: "1분",
        minutes: "{value}분",
        hour: "1시간",
        hours: "{value}시간",
        day: "1일",
        days: "{value}일",
        month: "1개월",
        months: "{value}개월",
        year: "1년",
        years: "{value}년",
    },
};

static ES: Translation = Translation {
    months_long: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    months_short: [
        "ene.", "feb.", "mar.", "abr.", "may.", "jun.", "jul.", "ago.", "sep.", "oct.", "nov.",
        "dic.",
    ],
    days_long: [
        "domingo",
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
    ],
    days_short: ["dom.", "lun.", "mar.", "mié.", "jue.", "vie.", "sáb."],
    relative: RelativeTable {
        future: "en {value}",
        past: "hace {value}",
        few_seconds: "unos segundos",
        minute: "un minuto",
        minutes: "{value} minutos",
        hour: "una hora",
        hours: "{value} horas",
        day: "un día",
        days: "{value} días",
        month: "un mes",
        months: "{value} meses",
        year: "un año",
        years: "{value} años",
    },
};

static PT: Translation = Translation {
    months_long: [
        "janeiro",
        "fevereiro",
        "março",
        "abril",
        "maio",
        "junho",
        "julho",
        "agosto",
        "setembro",
        "outubro",
        "novembro",
        "dezembro",
    ],
    months_short: [
        "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.",
        "dez.",
    ],
    days_long: [
        "domingo",
        "segunda-feira",
        "terça-feira",
        "quarta-feira",
        "quinta-feira",
        "sexta-feira",
        "sábado",
    ],
    days_short: ["dom.", "seg.", "ter.", "qua.", "qui.", "sex.", "sáb."],
    relative: RelativeTable {
        future: "em {value}",
        past: "há {value}",
        few_seconds: "alguns segundos",
        minute: "um minuto",
        minutes: "{value} minutos",
        hour: "uma hora",
        hours: "{value} horas",
        day: "um dia",
        days: "{value} dias",
        month: "um mês",
        months: "{value} meses",
        year: "um ano",
        years: "{value} anos",
    },
};
