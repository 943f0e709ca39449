//! Status texts shown to the desk operator.

use steppe_core::StatusMessage;

/// Reason used when an image decodes to nothing but whitespace.
pub const EMPTY_RESULT: &str = "пустой результат";

pub fn engine_unavailable() -> StatusMessage {
    StatusMessage::error(
        "Сканер не загрузился. Проверьте подключение к интернету или введите номер вручную.",
    )
}

pub fn requesting_camera() -> StatusMessage {
    StatusMessage::neutral("Запрос доступа к камере...")
}

pub fn point_camera() -> StatusMessage {
    StatusMessage::neutral("Наведите камеру на QR-код.")
}

pub fn camera_failed(reason: &str) -> StatusMessage {
    StatusMessage::error(format!("Не удалось запустить камеру: {reason}"))
}

pub fn camera_stopped() -> StatusMessage {
    StatusMessage::neutral("Камера остановлена.")
}

pub fn code_found(code: &str) -> StatusMessage {
    StatusMessage::ok(format!("QR найден: {code}"))
}

pub fn decoding_image() -> StatusMessage {
    StatusMessage::neutral("Распознаю QR на изображении...")
}

pub fn image_not_decoded(reason: &str) -> StatusMessage {
    StatusMessage::error(format!("QR на изображении не найден: {reason}"))
}
