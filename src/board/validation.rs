//! Request body checks run by the HTTP layer before any store call.

use crate::board::error::{BoardError, BoardResult};
use crate::board::types::{
    CanvasPatch, CardPatch, CreateCanvasRequest, CreateCardRequest, NewCanvasInput, NewCardInput,
    UpdateCanvasRequest, UpdateCardRequest,
};

fn required_text(field: &str, value: &str) -> BoardResult<()> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!("{field} should not be empty")));
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> BoardResult<f64> {
    if !value.is_finite() {
        return Err(BoardError::Validation(format!(
            "{field} must be a finite number"
        )));
    }
    Ok(value)
}

fn canvas_reference(value: i32) -> BoardResult<i32> {
    if value <= 0 {
        return Err(BoardError::Validation(
            "canvasId must be a positive integer".to_string(),
        ));
    }
    Ok(value)
}

pub fn validate_create_canvas(request: CreateCanvasRequest) -> BoardResult<NewCanvasInput> {
    let name = request.name.trim().to_string();
    required_text("name", &name)?;
    Ok(NewCanvasInput {
        name,
        created_at: request.created_at,
    })
}

pub fn validate_update_canvas(request: UpdateCanvasRequest) -> BoardResult<CanvasPatch> {
    let name = match request.name {
        Some(name) => {
            let name = name.trim().to_string();
            required_text("name", &name)?;
            Some(name)
        }
        None => None,
    };
    Ok(CanvasPatch { name })
}

pub fn validate_create_card(request: CreateCardRequest) -> BoardResult<NewCardInput> {
    let title = request.title.trim().to_string();
    required_text("title", &title)?;
    Ok(NewCardInput {
        title,
        content: request.content,
        position_x: finite("positionX", request.position_x)?,
        position_y: finite("positionY", request.position_y)?,
        width: finite("width", request.width)?,
        height: finite("height", request.height)?,
        canvas_id: canvas_reference(request.canvas_id)?,
        created_at: request.created_at,
    })
}

pub fn validate_update_card(request: UpdateCardRequest) -> BoardResult<CardPatch> {
    let title = match request.title {
        Some(title) => {
            let title = title.trim().to_string();
            required_text("title", &title)?;
            Some(title)
        }
        None => None,
    };
    Ok(CardPatch {
        title,
        content: request.content,
        position_x: request.position_x.map(|v| finite("positionX", v)).transpose()?,
        position_y: request.position_y.map(|v| finite("positionY", v)).transpose()?,
        width: request.width.map(|v| finite("width", v)).transpose()?,
        height: request.height.map(|v| finite("height", v)).transpose()?,
        canvas_id: request.canvas_id.map(canvas_reference).transpose()?,
        created_at: request.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_request() -> CreateCardRequest {
        CreateCardRequest {
            title: "Todo".to_string(),
            content: "- [ ] write tests".to_string(),
            position_x: 100.0,
            position_y: 150.0,
            width: 200.0,
            height: 300.0,
            canvas_id: 1,
            created_at: None,
        }
    }

    #[test]
    fn test_canvas_name_is_trimmed() {
        let input = validate_create_canvas(CreateCanvasRequest {
            name: "  Sprint board  ".to_string(),
            created_at: None,
        })
        .unwrap();
        assert_eq!(input.name, "Sprint board");
    }

    #[test]
    fn test_blank_canvas_name_rejected() {
        let err = validate_create_canvas(CreateCanvasRequest {
            name: "   ".to_string(),
            created_at: None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "name should not be empty");
    }

    #[test]
    fn test_canvas_patch_without_name_is_empty() {
        let patch = validate_update_canvas(UpdateCanvasRequest::default()).unwrap();
        assert_eq!(patch, CanvasPatch::default());
    }

    #[test]
    fn test_card_requires_title() {
        let mut request = card_request();
        request.title = String::new();
        assert!(matches!(
            validate_create_card(request),
            Err(BoardError::Validation(_))
        ));
    }

    #[test]
    fn test_card_title_is_trimmed() {
        let mut request = card_request();
        request.title = "  Todo  ".to_string();
        assert_eq!(validate_create_card(request).unwrap().title, "Todo");

        let patch = validate_update_card(UpdateCardRequest {
            title: Some(" Done ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("Done"));
    }

    #[test]
    fn test_card_content_may_be_empty() {
        let mut request = card_request();
        request.content = String::new();
        assert_eq!(validate_create_card(request).unwrap().content, "");
    }

    #[test]
    fn test_card_rejects_non_positive_canvas_id() {
        let mut request = card_request();
        request.canvas_id = 0;
        assert!(validate_create_card(request).is_err());
    }

    #[test]
    fn test_card_rejects_nan_position() {
        let mut request = card_request();
        request.position_x = f64::NAN;
        let err = validate_create_card(request).unwrap_err();
        assert_eq!(err.to_string(), "positionX must be a finite number");
    }

    #[test]
    fn test_card_patch_keeps_only_supplied_fields() {
        let patch = validate_update_card(UpdateCardRequest {
            content: Some("Updated".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.content.as_deref(), Some("Updated"));
        assert!(patch.title.is_none());
        assert!(patch.width.is_none());
        assert!(patch.canvas_id.is_none());
    }

    #[test]
    fn test_card_patch_rejects_blank_title() {
        let err = validate_update_card(UpdateCardRequest {
            title: Some(" ".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
    }
}
