use serde::Deserialize;

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub guest_id: String,
    pub reservation_id: String,
}

#[derive(Deserialize)]
pub struct RegisterSpareRequest {
    pub guest_id: String,
    pub reservation_id: String,
}

#[derive(Deserialize)]
pub struct EnterRequest {
    pub exhibition_id: String,
}

#[derive(Deserialize)]
pub struct ExitRequest {
    pub exhibition_id: String,
}
