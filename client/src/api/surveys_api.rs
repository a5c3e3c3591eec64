use shared::{
    CreateSurveyRequest, MessageResponse, Paginated, SubmitCountingRequest, Survey, SurveyListQuery,
    SurveyStats, UpdateSurveyRequest,
};

use super::acknowledged;
use crate::error::Result;
use crate::pipeline::{ApiClient, ApiRequest};

pub async fn list_surveys(client: &ApiClient, query: &SurveyListQuery) -> Result<Paginated<Survey>> {
    client
        .results(ApiRequest::get("surveys").query(query.to_query()))
        .await
}

pub async fn get_survey(client: &ApiClient, id: &str) -> Result<Survey> {
    client.results(ApiRequest::get(format!("surveys/{id}"))).await
}

pub async fn create_survey(client: &ApiClient, request: &CreateSurveyRequest) -> Result<Survey> {
    client
        .results(ApiRequest::post("surveys/create").json(request)?)
        .await
}

pub async fn update_survey(client: &ApiClient, request: &UpdateSurveyRequest) -> Result<Survey> {
    client
        .results(ApiRequest::put(format!("surveys/{}", request.id)).json(request)?)
        .await
}

pub async fn delete_survey(client: &ApiClient, id: &str) -> Result<MessageResponse> {
    acknowledged(client, ApiRequest::delete(format!("surveys/{id}"))).await
}

pub async fn start_survey(client: &ApiClient, id: &str) -> Result<Survey> {
    client
        .results(ApiRequest::put(format!("surveys/{id}/start")))
        .await
}

pub async fn end_survey(client: &ApiClient, id: &str) -> Result<Survey> {
    client
        .results(ApiRequest::put(format!("surveys/{id}/end")))
        .await
}

pub async fn survey_stats(client: &ApiClient) -> Result<SurveyStats> {
    client
        .results(ApiRequest::get("surveys/stats/overview"))
        .await
}

pub async fn submit_counting(client: &ApiClient, request: &SubmitCountingRequest) -> Result<MessageResponse> {
    acknowledged(client, ApiRequest::post("surveys/counting").json(request)?).await
}
