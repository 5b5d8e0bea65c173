//! Profile display

use crate::models::User;

pub fn format_user_details(user: &User) -> String {
    let picture = match &user.profile_picture {
        Some(_) if user.has_custom_picture() => "custom upload".to_string(),
        Some(url) => url.clone(),
        None => "(none)".to_string(),
    };

    format!(
        "Name:    {}\nEmail:   {}\nRole:    {}\nPicture: {}\nID:      {}\n",
        user.name, user.email, user.role, picture, user.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PROFILE_PICTURE;

    #[test]
    fn test_user_details() {
        let mut user = User::new("Jane", "jane@example.com");
        let output = format_user_details(&user);
        assert!(output.contains("Email:   jane@example.com"));
        assert!(output.contains(DEFAULT_PROFILE_PICTURE));

        user.profile_picture = Some("data:image/png;base64,AAAA".into());
        assert!(format_user_details(&user).contains("custom upload"));
    }
}
