//! 字段校验
//!
//! 全部是纯函数：先 trim 再按字符数判断，
//! 失败时返回带 code 的 `ApiError`，由 UI 层映射本地化文案。

use crate::error::{ApiResult, ErrorCode};

/// 校验问题标题（5-200 字符）
pub fn validate_title(title: &str) -> ApiResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ErrorCode::TitleRequired.into());
    }
    let len = trimmed.chars().count();
    if len < 5 {
        return Err(ErrorCode::TitleTooShort.into());
    }
    if len > 200 {
        return Err(ErrorCode::TitleTooLong.into());
    }
    Ok(())
}

/// 校验问题描述（10-5000 字符）
pub fn validate_description(description: &str) -> ApiResult<()> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ErrorCode::DescriptionRequired.into());
    }
    let len = trimmed.chars().count();
    if len < 10 {
        return Err(ErrorCode::DescriptionTooShort.into());
    }
    if len > 5000 {
        return Err(ErrorCode::DescriptionTooLong.into());
    }
    Ok(())
}

/// 校验评论内容（3-1000 字符）
pub fn validate_comment(content: &str) -> ApiResult<()> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ErrorCode::CommentRequired.into());
    }
    let len = trimmed.chars().count();
    if len < 3 {
        return Err(ErrorCode::CommentTooShort.into());
    }
    if len > 1000 {
        return Err(ErrorCode::CommentTooLong.into());
    }
    Ok(())
}

/// 校验用户名（非空即可）
pub fn validate_username(username: &str) -> ApiResult<()> {
    if username.trim().is_empty() {
        return Err(ErrorCode::UsernameRequired.into());
    }
    Ok(())
}

/// 校验密码（非空即可）
pub fn validate_password(password: &str) -> ApiResult<()> {
    if password.trim().is_empty() {
        return Err(ErrorCode::PasswordRequired.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("How do I center a div?").is_ok());
        // 恰好 5 个字符
        assert!(validate_title("12345").is_ok());
        assert_eq!(
            validate_title("1234").unwrap_err().code,
            ErrorCode::TitleTooShort
        );
        assert_eq!(
            validate_title("   ").unwrap_err().code,
            ErrorCode::TitleRequired
        );
        let long = "a".repeat(201);
        assert_eq!(
            validate_title(&long).unwrap_err().code,
            ErrorCode::TitleTooLong
        );
    }

    #[test]
    fn test_title_is_trimmed_before_counting() {
        // trim 后只剩 4 个字符
        assert_eq!(
            validate_title("  1234  ").unwrap_err().code,
            ErrorCode::TitleTooShort
        );
    }

    #[test]
    fn test_description_bounds() {
        assert!(validate_description("Tried margin:auto, didn't work").is_ok());
        assert_eq!(
            validate_description("too short").unwrap_err().code,
            ErrorCode::DescriptionTooShort
        );
        assert_eq!(
            validate_description("").unwrap_err().code,
            ErrorCode::DescriptionRequired
        );
        let long = "a".repeat(5001);
        assert_eq!(
            validate_description(&long).unwrap_err().code,
            ErrorCode::DescriptionTooLong
        );
    }

    #[test]
    fn test_comment_bounds() {
        assert!(validate_comment("use flexbox!!").is_ok());
        assert_eq!(
            validate_comment("ab").unwrap_err().code,
            ErrorCode::CommentTooShort
        );
        let long = "a".repeat(1001);
        assert_eq!(
            validate_comment(&long).unwrap_err().code,
            ErrorCode::CommentTooLong
        );
    }

    #[test]
    fn test_credentials_required() {
        assert!(validate_username("dev_master").is_ok());
        assert_eq!(
            validate_username("  ").unwrap_err().code,
            ErrorCode::UsernameRequired
        );
        assert_eq!(
            validate_password("").unwrap_err().code,
            ErrorCode::PasswordRequired
        );
    }

    #[test]
    fn test_multibyte_counted_by_chars() {
        // 5 个中文字符应当通过标题校验
        assert!(validate_title("居中的问题").is_ok());
    }
}
