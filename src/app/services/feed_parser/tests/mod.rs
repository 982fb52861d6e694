//! Test fixtures shared across feed parser test modules


/// Full-width feed in the flat (per-row timestamp) shape
pub fn flat_feed() -> String {
    "\
Идентификатор,Статус,Парное место,Кладовая,Площадь м/м,Площадь кладовой,Общая площадь,Цена за м²,Обновлено
P001,Доступно,P002,K0001,10,4,14,5000,1/15/2030 10:00:00
P002,Бронь,,,\"11,5\",,\"11,5\",5000,1/15/2030 10:00:00
K0001,Доступно,,,,4.0,4.0,8000,1/14/2030 9:30:00
"
    .to_string()
}

/// Feed in the header-global shape: one timestamp cell up front, every other
/// column shifted right by one
pub fn header_global_feed() -> String {
    "\
\"1/15/2030 12:00:00\",Идентификатор,Статус,Парное место,Кладовая,Площадь м/м,Площадь кладовой,Общая площадь,Цена за м²
,P001,Доступно,,K0001,10,4,14,5000
,K0001,Бронь,,,,4,4,8000
"
    .to_string()
}

/// Legacy five-column feed without pairing or storage columns
pub fn legacy_feed() -> String {
    "\
Идентификатор,Цена,Площадь,Статус,Обновлено
P001,5000,10,Доступно,
P002,6000,12,Продано,
"
    .to_string()
}

/// CSV-encode a single field the way the sheet export does
pub fn encode_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
