// crates/mp_report/src/phrases.rs
//
// Fixed phrasebook for the single supported locale (ru). Compile-time only;
// no runtime locale lookups, so output is stable across hosts.

use mp_core::{ConductFormat, VoteChoice};

pub const HEADER_BOILERPLATE: &str =
    "Документ сформирован в электронном виде по итогам голосования собственников помещений";
pub const REGULATORY_CITATION: &str =
    "Оформлен в соответствии со ст. 44–48 Жилищного кодекса Российской Федерации и \
     Требованиями к оформлению протоколов общих собраний собственников помещений \
     в многоквартирных домах (Приказ Минстроя России от 28.01.2019 № 44/пр)";

pub const TITLE_PROTOCOL: &str = "ПРОТОКОЛ №";
pub const TITLE_HEADING: &str = "общего собрания собственников помещений в многоквартирном доме";
pub const TITLE_ADDRESS: &str = "расположенном по адресу:";

pub const INFO_DATE: &str = "Дата проведения собрания";
pub const INFO_TIME: &str = "Время начала собрания";
pub const INFO_VENUE: &str = "Место проведения собрания";

pub const QUORUM_HEADING: &str = "Сведения о кворуме";
pub const QUORUM_TOTAL_AREA: &str = "Общая площадь жилых и нежилых помещений";
pub const QUORUM_VOTED_AREA: &str = "Площадь помещений собственников, принявших участие в голосовании";
pub const QUORUM_PARTICIPATION: &str = "Доля участия";
pub const QUORUM_COUNTS: &str = "Приняли участие собственников";
pub const QUORUM_THRESHOLD: &str = "Необходимый кворум";
pub const QUORUM_REACHED: &str = "Кворум имеется. Общее собрание правомочно принимать решения по вопросам повестки дня.";
pub const QUORUM_MISSING: &str = "Кворум отсутствует. Общее собрание неправомочно принимать решения.";

pub const AGENDA_HEADING: &str = "Повестка дня";
pub const ELECT_CHAIR_TITLE: &str = "Избрание председателя и секретаря общего собрания";
pub const ELECT_CHAIR_CHAIR: &str = "Председатель общего собрания";
pub const ELECT_CHAIR_SECRETARY: &str = "Секретарь общего собрания";
pub const ELECT_CHAIR_NOTE: &str = "Председатель и секретарь общего собрания избраны общим собранием.";

pub const TALLY_HEADING: &str = "Итоги голосования";
pub const DECISION_APPROVED: &str = "Решение принято.";
pub const DECISION_REJECTED: &str = "Решение не принято.";
pub const VOTERS_HEADING: &str = "Поимённые результаты голосования";

pub const COL_NO: &str = "№";
pub const COL_OWNER: &str = "Собственник";
pub const COL_UNIT: &str = "Помещение";
pub const COL_AREA: &str = "Площадь, м²";
pub const COL_CHOICE: &str = "Решение";
pub const COL_TIME: &str = "Время";
pub const COL_JUSTIFICATION: &str = "Обоснование";
pub const COL_SIGNATURE: &str = "QR-подпись";

pub const ATTRIBUTION_ORGANIZER: &str = "Протокол составил";
pub const ATTRIBUTION_ORGANIZATION: &str = "Организация";

pub const APPENDIX_HEADING: &str =
    "Приложение № 1. Реестр собственников помещений, принявших участие в голосовании";

pub const FOOTER_GENERATED: &str = "Дата и время формирования документа";
pub const FOOTER_HASH: &str = "Контрольная сумма (SHA-256)";

pub const UNIT_SQM: &str = "м²";

/// Genitive month names, January first.
pub const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

pub fn conduct_format(f: ConductFormat) -> &'static str {
    match f {
        ConductFormat::InPerson => "проведённого в форме очного голосования",
        ConductFormat::Remote => "проведённого в форме заочного голосования",
        ConductFormat::Hybrid => "проведённого в форме очно-заочного голосования",
    }
}

pub fn choice(c: VoteChoice) -> &'static str {
    match c {
        VoteChoice::For => "За",
        VoteChoice::Against => "Против",
        VoteChoice::Abstain => "Воздержался",
    }
}

/// Column captions of the per-item tally table.
pub const TALLY_COLUMNS: [&str; 3] = ["За", "Против", "Воздержались"];
